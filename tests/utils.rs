use std::sync::Arc;
use std::sync::Mutex;

use tokio::io::AsyncReadExt as _;
use tokio::io::AsyncWriteExt as _;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer as _;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A request received by [`FakeGitlab`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

impl CapturedRequest {
    /// The GraphQL operation name, e.g. `CREATE_BRANCH`.
    pub fn operation(&self) -> String {
        let query = self.body["query"].as_str().unwrap_or("");
        query
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.split('(').next())
            .unwrap_or("")
            .to_string()
    }

    pub fn variables(&self) -> String {
        serde_json::to_string_pretty(&self.body["variables"]).unwrap()
    }
}

/// Local HTTP server answering one canned response per connection, in order.
pub struct FakeGitlab {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeGitlab {
    pub async fn start(responses: Vec<(u16, &str)>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("http://{}/api/graphql", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let captured = requests.clone();
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();
        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                match read_request(&mut stream).await {
                    Ok(request) => captured.lock().unwrap().push(request),
                    Err(e) => {
                        eprintln!("fake gitlab: bad request: {:#}", e);
                        return;
                    }
                }
                if let Err(e) = write_response(&mut stream, status, &body).await {
                    eprintln!("fake gitlab: cannot respond: {:#}", e);
                    return;
                }
            }
        });

        Ok(Self { endpoint, requests })
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// An endpoint on which nothing listens.
pub async fn closed_endpoint() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let endpoint = format!("http://{}/api/graphql", listener.local_addr()?);
    drop(listener);
    Ok(endpoint)
}

async fn read_request(stream: &mut TcpStream) -> anyhow::Result<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        anyhow::ensure!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8(buf[..header_end].to_vec())?;
    let mut content_length = 0;
    let mut authorization = None;
    for line in head.lines().skip(1) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "content-length" => content_length = value.trim().parse()?,
            "authorization" => authorization = Some(value.trim().to_string()),
            _ => {}
        }
    }

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        anyhow::ensure!(n > 0, "connection closed before body was complete");
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = serde_json::from_slice(&buf[header_end..header_end + content_length])?;
    Ok(CapturedRequest {
        authorization,
        body,
    })
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> anyhow::Result<()> {
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

pub fn setup_logging() -> anyhow::Result<()> {
    let timer = tracing_subscriber::fmt::time::ChronoLocal::new("%H:%M:%S%.3f".into());
    let format = tracing_subscriber::fmt::format().with_timer(timer);
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;
    let subscriber = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_test_writer()
        .with_filter(filter);
    tracing_subscriber::registry().with(subscriber).init();
    Ok(())
}
