//! End-to-end connection-lifecycle tests against the compiled reference
//! binary: keepalive reuse, explicit close, unknown-host routing, and
//! malformed-request handling, all driven over a raw `TcpStream` so the
//! exact bytes on the wire are under the test's control.

mod util;

use std::time::Duration;

use tokio::{
	io::{AsyncReadExt, AsyncWriteExt},
	net::TcpStream,
	time::timeout,
};

const ADDR: &str = "127.0.0.1:18080";

async fn connect() -> TcpStream {
	// The server has ~250ms to come up; retry briefly in case the first
	// connect races the bind.
	for _ in 0..20 {
		if let Ok(stream) = TcpStream::connect(ADDR).await {
			return stream;
		}
		tokio::time::sleep(Duration::from_millis(50)).await;
	}
	panic!("server never started listening on {ADDR}");
}

async fn read_response(stream: &mut TcpStream) -> String {
	let mut buf = vec![0u8; 8192];
	let n = timeout(Duration::from_secs(2), stream.read(&mut buf))
		.await
		.expect("response timed out")
		.expect("read failed");
	String::from_utf8_lossy(&buf[..n]).into_owned()
}

#[tokio::test(flavor = "multi_thread")]
#[serial_test::serial]
async fn get_root_returns_200_with_demo_body() {
	let _server = util::start_server("basic.toml");
	let mut stream = connect().await;

	stream
		.write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
		.await
		.unwrap();

	let response = read_response(&mut stream).await;
	assert!(response.starts_with("HTTP/1.1 200"), "{response}");
	assert!(response.contains("host: localhost"), "{response}");
	assert!(response.contains("path: /"), "{response}");
}

#[tokio::test(flavor = "multi_thread")]
#[serial_test::serial]
async fn keepalive_connection_serves_a_second_request() {
	let _server = util::start_server("basic.toml");
	let mut stream = connect().await;

	stream
		.write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
		.await
		.unwrap();
	let first = read_response(&mut stream).await;
	assert!(first.starts_with("HTTP/1.1 200"), "{first}");
	assert!(first.contains("Connection: keep-alive"), "{first}");

	// The same socket must still be usable for a second request.
	stream
		.write_all(b"GET /again HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
		.await
		.unwrap();
	let second = read_response(&mut stream).await;
	assert!(second.starts_with("HTTP/1.1 200"), "{second}");
	assert!(second.contains("path: /again"), "{second}");
}

#[tokio::test(flavor = "multi_thread")]
#[serial_test::serial]
async fn connection_close_header_closes_the_socket() {
	let _server = util::start_server("basic.toml");
	let mut stream = connect().await;

	stream
		.write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
		.await
		.unwrap();
	let response = read_response(&mut stream).await;
	assert!(response.contains("Connection: close"), "{response}");

	// The server should have closed its end; a further read returns 0.
	let mut buf = [0u8; 16];
	let n = timeout(Duration::from_secs(2), stream.read(&mut buf))
		.await
		.expect("read after close timed out")
		.expect("read failed");
	assert_eq!(n, 0);
}

#[tokio::test(flavor = "multi_thread")]
#[serial_test::serial]
async fn unknown_host_returns_404() {
	let _server = util::start_server("basic.toml");
	let mut stream = connect().await;

	stream
		.write_all(b"GET / HTTP/1.1\r\nHost: nope.example\r\nConnection: close\r\n\r\n")
		.await
		.unwrap();

	let response = read_response(&mut stream).await;
	assert!(response.starts_with("HTTP/1.1 404"), "{response}");
}

#[tokio::test(flavor = "multi_thread")]
#[serial_test::serial]
async fn malformed_request_line_returns_400_and_closes() {
	let _server = util::start_server("basic.toml");
	let mut stream = connect().await;

	stream.write_all(b"GARBAGE\r\n\r\n").await.unwrap();

	let response = read_response(&mut stream).await;
	assert!(response.starts_with("HTTP/1.1 400"), "{response}");
}
