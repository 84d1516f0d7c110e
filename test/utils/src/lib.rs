use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// A typical streamed answer with an explicit markdown checklist.
pub fn checklist_response_fixture() -> &'static str {
    return r#"
Here's a plan to improve your tomato yield this winter.

## Preparation
- Choose a cold tolerant variety
- Mulch the beds to keep the soil warm

## Action Steps
- [ ] Test soil pH
- [ ] Apply fertilizer
- [ ] Install drip irrigation

Good luck with the season!
"#
    .trim();
}

/// An answer with only plain bullet points, twelve of them.
pub fn bullet_response_fixture() -> &'static str {
    return r#"
Follow these steps:

- Step 1
- Step 2
- Step 3
- Step 4
- Step 5
- Step 6
- Step 7
- Step 8
- Step 9
- Step 10
- Step 11
- Step 12
"#
    .trim();
}

/// Server-sent event body the way OpenRouter streams it, including a keep-alive
/// comment, a malformed line and trailing events after `[DONE]`.
pub fn sse_stream_fixture() -> &'static str {
    return r#": OPENROUTER PROCESSING

data: {"id":"gen-1","choices":[{"index":0,"delta":{"role":"assistant","content":"Test "}}]}

data: {"id":"gen-1","choices":[{"index":0,"delta":{"content":"soil"}}]}

data: {not json at all

data: {"id":"gen-1","choices":[{"index":0,"delta":{"content":" pH."}}]}

data: {"id":"gen-1","choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}

data: [DONE]

data: {"id":"gen-1","choices":[{"index":0,"delta":{"content":" ignored"}}]}
"#;
}

/// What a partial stream server does after writing its single chunk.
#[derive(Clone, Copy, Debug)]
pub enum StreamEnd {
    /// Keeps the connection open and sends nothing else.
    Hang,
    /// Closes its side before the chunked body is terminated.
    Close,
}

/// Starts a server answering every request with a `200` event stream that
/// carries `chunk` and then ends as `end` says. Returns the base URL.
pub async fn partial_stream_server(chunk: &'static str, end: StreamEnd) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0; 8192];
                let _ = socket.read(&mut buf).await;

                let head = "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\n\r\n";
                let body = format!("{:x}\r\n{chunk}\r\n", chunk.len());
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(body.as_bytes()).await;
                let _ = socket.flush().await;

                if let StreamEnd::Close = end {
                    let _ = socket.shutdown().await;
                }

                // Drain until the client gives up on the connection.
                while let Ok(read) = socket.read(&mut buf).await {
                    if read == 0 {
                        break;
                    }
                }
            });
        }
    });

    return url;
}
