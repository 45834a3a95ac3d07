//! Shared helpers: a scripted HTTP agent stub and a temp config file.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use tempfile::TempDir;

/// Canned response for one request.
#[derive(Clone)]
pub struct Reply {
    pub status: &'static str,
    pub body: &'static str,
}

pub const NO_CONTENT: Reply = Reply { status: "204 No Content", body: "" };
pub const SERVER_ERROR: Reply = Reply {
    status: "500 Internal Server Error",
    body: "unable to cancel agreements",
};
pub const UNCONFIGURED: Reply = Reply {
    status: "200 OK",
    body: r#"{"id":"node1","config":{"state":"unconfigured"}}"#,
};
pub const CONFIGURED: Reply = Reply {
    status: "200 OK",
    body: r#"{"id":"node1","config":{"state":"configured"}}"#,
};

/// Local agent stub. Answers requests in order; the last reply repeats.
pub struct AgentStub {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl AgentStub {
    pub fn serve(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}", listener.local_addr().expect("addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        std::thread::spawn(move || {
            let mut replies = replies.into_iter().peekable();
            let mut last = None;
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 8192];
                let n = stream.read(&mut buf).unwrap_or(0);
                let line = String::from_utf8_lossy(&buf[..n])
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                seen.lock().unwrap().push(line);
                if let Some(next) = replies.next() {
                    last = Some(next);
                }
                let Some(reply) = last.clone() else { break };
                let resp = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.status,
                    reply.body.len(),
                    reply.body
                );
                let _ = stream.write_all(resp.as_bytes());
            }
        });
        Self { url, requests }
    }

    /// Request lines received so far, e.g. `GET /node HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// A URL nothing is listening on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

/// Write `yaml` to a fresh config file. Keep the `TempDir` alive.
pub fn config_file(yaml: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, yaml).expect("write config");
    (dir, path.to_string_lossy().into_owned())
}

/// Fast polling so convergence tests finish in a few seconds.
pub const FAST_POLL: &str = "agent:\n  poll_interval_secs: 1\n  convergence_timeout_secs: 3\n  teardown_timeout_secs: 5\n";

pub fn edgenode() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("edgenode"));
    cmd.env("NO_COLOR", "1")
        .env_remove("EDGENODE_AGENT_URL")
        .env_remove("EDGENODE_LOG")
        .env_remove("CI")
        .env_remove("EDGENODE_YES");
    cmd
}
