#[cfg(test)]
use crate::core::inference::{InferenceClient, InferenceError};
#[cfg(test)]
use crate::core::message::{Role, Turn};
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use tokio::io::{AsyncReadExt, AsyncWriteExt};
#[cfg(test)]
use tokio::net::TcpListener;
#[cfg(test)]
use tokio::task::JoinHandle;

/// Inference client that replays a canned reply and records every call.
#[cfg(test)]
#[derive(Clone)]
pub struct ScriptedClient {
    reply: Result<String, InferenceError>,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

#[cfg(test)]
impl ScriptedClient {
    pub fn replying(text: &str) -> Self {
        Self::with_result(Ok(text.to_string()))
    }

    pub fn failing(err: InferenceError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(reply: Result<String, InferenceError>) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(prompt, model)` pairs in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl InferenceClient for ScriptedClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), model.to_string()));
        self.reply.clone()
    }
}

#[cfg(test)]
pub fn create_test_turns() -> Vec<Turn> {
    vec![
        Turn::with_timestamp(Role::User, "Hello", "09:15:00"),
        Turn::with_timestamp(Role::Assistant, "Hi there!", "09:15:02"),
        Turn::with_timestamp(Role::User, "How are you?", "09:15:10"),
        Turn::with_timestamp(
            Role::Assistant,
            "I'm doing well, thank you for asking!",
            "09:15:13",
        ),
    ]
}

/// HTTP client that ignores proxy settings from the environment so requests
/// reach the loopback mock servers.
#[cfg(test)]
pub fn test_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client")
}

#[cfg(test)]
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: Vec<u8>,
}

/// Accept one connection on a loopback port, answer it with `status` and
/// `body`, and hand back what the client sent.
#[cfg(test)]
pub async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, JoinHandle<Result<CapturedRequest, String>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
        let captured = read_http_request(&mut stream).await?;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .map_err(|err| err.to_string())?;
        stream.shutdown().await.map_err(|err| err.to_string())?;
        Ok(captured)
    });

    (format!("http://{addr}"), handle)
}

/// A base URL on a loopback port nothing is listening on.
#[cfg(test)]
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);
    format!("http://{addr}")
}

/// A base URL whose server accepts connections and never answers. The
/// returned task keeps the accepted stream open until it is dropped.
#[cfg(test)]
pub async fn silent_base_url() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    (format!("http://{addr}"), handle)
}

#[cfg(test)]
async fn read_http_request(stream: &mut tokio::net::TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.expect("header end should exist");
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut content_length = 0_usize;
    for line in lines {
        let mut parts = line.splitn(2, ':');
        let Some(name) = parts.next() else {
            continue;
        };
        if name.eq_ignore_ascii_case("content-length") {
            let value = parts.next().unwrap_or_default().trim();
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest { request_line, body })
}
