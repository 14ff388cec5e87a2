//! A tiny server feeding raw socket reads into the incremental parser.
//!
//! Every read, whatever its size, is handed straight to [`Request::feed`]. Once the request
//! is finished the server answers `200 OK` echoing the parsed fields; a parse error is
//! answered with `400 Bad Request`. Either way the connection is closed afterwards.
//!
//! Try it with a deliberately slow client:
//!
//! ```text
//! (printf 'POST /echo HT'; sleep 1; printf 'TP/1.1\r\nContent-Le'; sleep 1; printf 'ngth: 5\r\n\r\nhello') | nc 127.0.0.1 8080
//! ```

use std::io;

use micro_http_parser::protocol::Request;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const READ_BUFFER_SIZE: usize = 64;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = 8080, "start listening");
    let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        tokio::spawn(async move {
            match serve(tcp_stream).await {
                Ok(()) => info!(%remote_addr, "finished process, connection shutdown"),
                Err(e) => error!(%remote_addr, cause = %e, "connection error, connection shutdown"),
            }
        });
    }
}

async fn serve(mut stream: TcpStream) -> io::Result<()> {
    let mut request = Request::new().map_err(io::Error::other)?;
    let mut buf = [0u8; READ_BUFFER_SIZE];

    while !request.state().is_terminal() {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            warn!(state = ?request.state(), "peer closed before the request was complete");
            return Ok(());
        }
        let consumed = request.feed(&buf[..n]);
        info!(read = n, consumed, state = ?request.state(), "fed chunk");
    }

    let response = match request.error() {
        Some(e) => {
            warn!(cause = %e, "rejecting request");
            format!("HTTP/1.1 400 Bad Request\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{e}\n", e.to_string().len() + 1)
        }
        None => {
            let body = describe(&request);
            format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}", body.len())
        }
    };

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn describe(request: &Request) -> String {
    let text = |bytes: Option<&bytes::Bytes>| bytes.map(|b| String::from_utf8_lossy(b).into_owned()).unwrap_or_default();

    let mut out = format!("method: {}\npath: {}\nversion: {}\n", text(request.method()), text(request.path()), text(request.version()));
    for (key, values) in request.headers().iter() {
        for value in values {
            out.push_str(&format!("{}: {}\n", String::from_utf8_lossy(key), String::from_utf8_lossy(value)));
        }
    }
    if let Some(body) = request.body() {
        out.push_str(&format!("body: {} bytes\n", body.len()));
    }
    out
}
