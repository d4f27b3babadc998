//! Snowflake catalog client.
//!
//! Talks to the account endpoint with raw HTTP requests (no driver SDK):
//! a password login that yields a session token, then one JSON statement
//! request per introspection query. Results are requested in JSON format so a
//! row is a list of optional strings keyed by the statement's row type.

use crate::client::CatalogClient;
use crate::error::{CatalogError, Result};
use crate::table_ref::{resolved_identifier, sql_identifier, TableRef};
use crate::types::{RawColumn, Secret, SessionIdentity, TableMetadata};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Overrides the account endpoint (proxies, private links, test servers).
pub const BASE_URL_ENV: &str = "SNOW2DBT_SNOWFLAKE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const CLIENT_APP_ID: &str = "snow2dbt";
const CLIENT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Snowflake error codes that mean the credentials were refused.
const AUTH_ERROR_CODES: &[&str] = &["390100", "390144", "390318", "390422"];
/// "Object does not exist or not authorized".
const OBJECT_NOT_FOUND_CODE: &str = "002003";

/// Connection settings that are not part of the identity.
#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    /// Endpoint override; defaults to `https://<account>.snowflakecomputing.com`
    pub base_url: Option<String>,
    pub warehouse: Option<String>,
    pub role: Option<String>,
    pub timeout: Duration,
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            warehouse: None,
            role: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SnowflakeConfig {
    /// Defaults plus the endpoint override from the environment.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn with_warehouse(mut self, warehouse: Option<String>) -> Self {
        self.warehouse = warehouse;
        self
    }

    pub fn with_role(mut self, role: Option<String>) -> Self {
        self.role = role;
        self
    }

    /// Base URL for an account, without a trailing slash.
    pub fn endpoint(&self, account: &str) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.snowflakecomputing.com", account),
        }
    }
}

/// One decoded result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn new(cells: Vec<(String, Option<String>)>) -> Self {
        Self { cells }
    }

    /// Cell value by column name, compared case-insensitively.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .and_then(|(_, value)| value.as_deref())
    }

    fn require(&self, column: &str) -> Result<&str> {
        self.get(column)
            .ok_or_else(|| CatalogError::protocol(format!("result row has no '{}' value", column)))
    }
}

/// An authenticated Snowflake session.
pub struct SnowflakeClient {
    http: reqwest::blocking::Client,
    base_url: String,
    account: String,
    token: Secret,
    sequence: Cell<u64>,
}

impl SnowflakeClient {
    /// Log in as `identity` and keep the session token.
    pub fn connect(identity: &SessionIdentity, config: SnowflakeConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("{}/{}", CLIENT_APP_ID, CLIENT_APP_VERSION))
            .build()?;
        let base_url = config.endpoint(&identity.account);

        info!(
            "Connecting to Snowflake account {} as {}",
            identity.account, identity.username
        );

        let mut url = reqwest::Url::parse(&format!("{}/session/v1/login-request", base_url))
            .map_err(|e| CatalogError::transport(format!("invalid endpoint {}: {}", base_url, e)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("requestId", &uuid::Uuid::new_v4().to_string());
            if let Some(warehouse) = &config.warehouse {
                query.append_pair("warehouse", warehouse);
            }
            if let Some(role) = &config.role {
                query.append_pair("roleName", role);
            }
        }

        let response = http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&login_request(identity))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        check_http_status(status, &body, &identity.account)?;

        let token = parse_login_response(&body, &identity.account)?;
        debug!("Snowflake session established");

        Ok(Self {
            http,
            base_url,
            account: identity.account.clone(),
            token,
            sequence: Cell::new(0),
        })
    }

    /// Run one statement with positional `?` bindings and return its rows.
    pub fn query(&self, sql: &str, bindings: &[&str]) -> Result<Vec<Row>> {
        let sequence_id = self.sequence.get() + 1;
        self.sequence.set(sequence_id);

        debug!(sequence_id, "Executing: {}", sql);

        let mut url = reqwest::Url::parse(&format!("{}/queries/v1/query-request", self.base_url))
            .map_err(|e| CatalogError::transport(format!("invalid endpoint: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("requestId", &uuid::Uuid::new_v4().to_string());

        let response = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Snowflake Token=\"{}\"", self.token.expose()),
            )
            .json(&query_request(sql, bindings, sequence_id))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        check_http_status(status, &body, &self.account)?;

        parse_query_response(&body, &self.account)
    }
}

impl CatalogClient for SnowflakeClient {
    fn describe_table_metadata(&self, table: &TableRef) -> Result<TableMetadata> {
        let statement = metadata_statement(table);
        let rows = self.query(&statement.sql, &statement.binding_refs())?;
        let row = rows
            .first()
            .ok_or_else(|| CatalogError::not_found(format!("table {}", table)))?;
        metadata_from_row(row)
    }

    fn describe_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>> {
        let statement = describe_statement(table);
        let rows = self.query(&statement.sql, &statement.binding_refs())?;
        rows.iter().map(column_from_row).collect()
    }
}

/// SQL text plus its positional bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub bindings: Vec<String>,
}

impl Statement {
    fn binding_refs(&self) -> Vec<&str> {
        self.bindings.iter().map(String::as_str).collect()
    }
}

/// `INFORMATION_SCHEMA.TABLES` lookup; schema and table are bound as the
/// names the warehouse stores.
pub fn metadata_statement(table: &TableRef) -> Statement {
    Statement {
        sql: format!(
            "SELECT * FROM {}.INFORMATION_SCHEMA.TABLES WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?",
            sql_identifier(&table.database)
        ),
        bindings: vec![
            resolved_identifier(&table.schema),
            resolved_identifier(&table.table),
        ],
    }
}

/// `DESCRIBE TABLE` on the fully qualified reference.
pub fn describe_statement(table: &TableRef) -> Statement {
    Statement {
        sql: format!("DESCRIBE TABLE {}", table.qualified_sql()),
        bindings: Vec::new(),
    }
}

// === Wire types ===

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    data: LoginData<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct LoginData<'a> {
    client_app_id: &'a str,
    client_app_version: &'a str,
    account_name: &'a str,
    login_name: &'a str,
    password: &'a str,
    session_parameters: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    sql_text: &'a str,
    async_exec: bool,
    sequence_id: u64,
    query_submission_time: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    bindings: BTreeMap<String, Binding>,
}

#[derive(Debug, Serialize)]
struct Binding {
    #[serde(rename = "type")]
    kind: &'static str,
    value: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct LoginResponseData {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponseData {
    #[serde(default)]
    rowtype: Vec<RowType>,
    #[serde(default)]
    rowset: Vec<Vec<Option<String>>>,
    #[serde(default)]
    chunks: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RowType {
    name: String,
}

fn login_request(identity: &SessionIdentity) -> LoginRequest<'_> {
    let mut session_parameters = BTreeMap::new();
    session_parameters.insert("QUERY_RESULT_FORMAT", "JSON");
    LoginRequest {
        data: LoginData {
            client_app_id: CLIENT_APP_ID,
            client_app_version: CLIENT_APP_VERSION,
            account_name: &identity.account,
            login_name: &identity.username,
            password: identity.secret.expose(),
            session_parameters,
        },
    }
}

fn query_request<'a>(sql: &'a str, bindings: &[&str], sequence_id: u64) -> QueryRequest<'a> {
    let bindings = bindings
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            (
                (idx + 1).to_string(),
                Binding {
                    kind: "TEXT",
                    value: (*value).to_string(),
                },
            )
        })
        .collect();
    QueryRequest {
        sql_text: sql,
        async_exec: false,
        sequence_id,
        query_submission_time: chrono::Utc::now().timestamp_millis(),
        bindings,
    }
}

fn check_http_status(status: reqwest::StatusCode, body: &str, account: &str) -> Result<()> {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(CatalogError::AuthRejected {
            account: account.to_string(),
            message: format!("HTTP {}", status),
        });
    }
    if !status.is_success() {
        let snippet: String = body.chars().take(200).collect();
        return Err(CatalogError::transport(format!("HTTP {}: {}", status, snippet)));
    }
    Ok(())
}

/// Map an unsuccessful envelope to the matching catalog error.
fn envelope_error(code: Option<&str>, message: Option<&str>, account: &str) -> CatalogError {
    let message = message.unwrap_or("no message").to_string();
    match code {
        Some(code) if AUTH_ERROR_CODES.contains(&code) => CatalogError::AuthRejected {
            account: account.to_string(),
            message,
        },
        Some(OBJECT_NOT_FOUND_CODE) => CatalogError::ObjectNotFound(message),
        Some(code) => CatalogError::protocol(format!("statement failed ({}): {}", code, message)),
        None => CatalogError::protocol(message),
    }
}

fn parse_login_response(body: &str, account: &str) -> Result<Secret> {
    let envelope: Envelope<LoginResponseData> = serde_json::from_str(body)?;
    if !envelope.success {
        // A refused login carries no reliable code on every deployment.
        let err = envelope_error(envelope.code.as_deref(), envelope.message.as_deref(), account);
        return Err(match err {
            CatalogError::Protocol(message) => CatalogError::AuthRejected {
                account: account.to_string(),
                message,
            },
            other => other,
        });
    }
    envelope
        .data
        .and_then(|data| data.token)
        .map(Secret::new)
        .ok_or_else(|| CatalogError::protocol("login response carried no session token"))
}

fn parse_query_response(body: &str, account: &str) -> Result<Vec<Row>> {
    let envelope: Envelope<QueryResponseData> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(envelope_error(
            envelope.code.as_deref(),
            envelope.message.as_deref(),
            account,
        ));
    }
    let data = envelope
        .data
        .ok_or_else(|| CatalogError::protocol("query response carried no data"))?;
    decode_rows(data)
}

fn decode_rows(data: QueryResponseData) -> Result<Vec<Row>> {
    if !data.chunks.is_empty() {
        return Err(CatalogError::protocol(
            "chunked result sets are not supported for catalog queries",
        ));
    }
    let names: Vec<String> = data.rowtype.into_iter().map(|rt| rt.name).collect();
    data.rowset
        .into_iter()
        .enumerate()
        .map(|(idx, values)| {
            if values.len() != names.len() {
                return Err(CatalogError::protocol(format!(
                    "row {} has {} values for {} columns",
                    idx,
                    values.len(),
                    names.len()
                )));
            }
            Ok(Row::new(names.iter().cloned().zip(values).collect()))
        })
        .collect()
}

/// Decode an `INFORMATION_SCHEMA.TABLES` row.
pub fn metadata_from_row(row: &Row) -> Result<TableMetadata> {
    Ok(TableMetadata {
        table_catalog: row.require("TABLE_CATALOG")?.to_string(),
        table_schema: row.require("TABLE_SCHEMA")?.to_string(),
        table_name: row.require("TABLE_NAME")?.to_string(),
        table_type: row.get("TABLE_TYPE").map(str::to_string),
        comment: row.get("COMMENT").map(str::to_string),
        row_count: row.get("ROW_COUNT").and_then(|v| v.parse().ok()),
    })
}

/// Decode a `DESCRIBE TABLE` row.
pub fn column_from_row(row: &Row) -> Result<RawColumn> {
    Ok(RawColumn::from_markers(
        row.require("name")?,
        row.require("type")?,
        row.get("primary key").unwrap_or_default(),
        row.get("null?").unwrap_or_default(),
        row.get("unique key").unwrap_or_default(),
    ))
}
