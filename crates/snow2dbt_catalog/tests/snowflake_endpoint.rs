//! SnowflakeClient against a local HTTP endpoint set through `base_url`.

use snow2dbt_catalog::{
    CatalogClient, CatalogError, CatalogFlag, Secret, SessionIdentity, SnowflakeClient,
    SnowflakeConfig, TableRef,
};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{mpsc, Once};
use std::thread::{self, JoinHandle};

const LOGIN_OK: &str = r#"{"data": {"token": "session-token"}, "success": true}"#;

const EMPTY_TABLES: &str = r#"{
    "data": {
        "rowtype": [{"name": "TABLE_CATALOG"}, {"name": "TABLE_SCHEMA"}, {"name": "TABLE_NAME"}],
        "rowset": []
    },
    "success": true
}"#;

const USERS_TABLES: &str = r#"{
    "data": {
        "rowtype": [{"name": "TABLE_CATALOG"}, {"name": "TABLE_SCHEMA"}, {"name": "TABLE_NAME"}],
        "rowset": [["ANALYTICS", "PUBLIC", "USERS"]]
    },
    "success": true
}"#;

const USERS_DESCRIBE: &str = r#"{
    "data": {
        "rowtype": [
            {"name": "name"}, {"name": "type"}, {"name": "null?"},
            {"name": "primary key"}, {"name": "unique key"}
        ],
        "rowset": [
            ["UserId", "NUMBER(38,0)", "N", "Y", "N"],
            ["Email-Addr", "VARCHAR(256)", "Y", "N", "Y"]
        ]
    },
    "success": true
}"#;

/// One captured request: path with query string, then the JSON body.
struct Captured {
    path: String,
    body: String,
}

/// Serve `responses` in order, one connection each, and report every request.
fn serve(responses: Vec<&'static str>) -> (String, mpsc::Receiver<Captured>, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        for response in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let path = request_line
                .split_whitespace()
                .nth(1)
                .unwrap_or_default()
                .to_string();

            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            tx.send(Captured {
                path,
                body: String::from_utf8(body).unwrap(),
            })
            .unwrap();

            let reply = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.len(),
                response
            );
            stream.write_all(reply.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
    });

    (base_url, rx, handle)
}

fn connect(base_url: String) -> SnowflakeClient {
    // Keep a proxy configured in the environment away from the loopback server.
    static NO_PROXY: Once = Once::new();
    NO_PROXY.call_once(|| std::env::set_var("NO_PROXY", "127.0.0.1"));
    let identity = SessionIdentity::new("acme-eu1", "loader", Secret::new("pw"));
    let config = SnowflakeConfig {
        base_url: Some(base_url),
        ..SnowflakeConfig::default()
    };
    SnowflakeClient::connect(&identity, config).unwrap()
}

#[test]
fn test_zero_metadata_rows_is_object_not_found() {
    let (base_url, requests, server) = serve(vec![LOGIN_OK, EMPTY_TABLES]);
    let client = connect(base_url);

    let err = client
        .describe_table_metadata(&TableRef::new("analytics", "public", "ghost"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::ObjectNotFound(_)));
    server.join().unwrap();

    let login = requests.recv().unwrap();
    assert!(login.path.starts_with("/session/v1/login-request?requestId="));
    let login: serde_json::Value = serde_json::from_str(&login.body).unwrap();
    assert_eq!(login["data"]["LOGIN_NAME"], "loader");

    let lookup = requests.recv().unwrap();
    assert!(lookup.path.starts_with("/queries/v1/query-request?requestId="));
    let lookup: serde_json::Value = serde_json::from_str(&lookup.body).unwrap();
    assert_eq!(
        lookup["sqlText"],
        "SELECT * FROM analytics.INFORMATION_SCHEMA.TABLES WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?"
    );
    assert_eq!(lookup["bindings"]["1"]["value"], "PUBLIC");
    assert_eq!(lookup["bindings"]["2"]["value"], "GHOST");
}

#[test]
fn test_metadata_then_columns_over_http() {
    let (base_url, requests, server) = serve(vec![LOGIN_OK, USERS_TABLES, USERS_DESCRIBE]);
    let client = connect(base_url);
    let table = TableRef::new("ANALYTICS", "PUBLIC", "USERS");

    let metadata = client.describe_table_metadata(&table).unwrap();
    assert_eq!(metadata.table_name, "USERS");

    let columns = client.describe_columns(&table).unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].name, "UserId");
    assert_eq!(columns[0].primary_key, CatalogFlag::Yes);
    assert_eq!(columns[1].unique_key, CatalogFlag::Yes);
    server.join().unwrap();

    let describe = requests.iter().nth(2).unwrap();
    let describe: serde_json::Value = serde_json::from_str(&describe.body).unwrap();
    assert_eq!(describe["sqlText"], "DESCRIBE TABLE ANALYTICS.PUBLIC.USERS");
    assert_eq!(describe["sequenceId"], 2);
    assert!(describe.get("bindings").is_none());
}
