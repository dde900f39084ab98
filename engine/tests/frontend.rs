use std::{io, sync::Arc};

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
};

use engine::{Registry, frontend, protocol::Response};

async fn spawn_frontend() -> io::Result<TcpStream> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let registry = Arc::new(Registry::with_sample_data());

    // Dropping the handle detaches the server task; it lives for the test.
    let _server = tokio::spawn(frontend::serve(listener, registry));

    TcpStream::connect(addr).await
}

async fn roundtrip(stream: &mut TcpStream, request: &str) -> io::Result<Response> {
    stream.write_all(request.as_bytes()).await?;
    stream.write_all(b"\n").await?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).await?;

    serde_json::from_str(&line).map_err(io::Error::other)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn status_then_train_then_predict() -> io::Result<()> {
    let mut stream = spawn_frontend().await?;

    let status = roundtrip(&mut stream, r#"{"op":"status"}"#).await?;
    assert_eq!(
        status,
        Response::Status {
            trained: false,
            models: Vec::new()
        }
    );

    let train = roundtrip(&mut stream, r#"{"op":"train"}"#).await?;
    let Response::Train { reports } = train else {
        panic!("expected a train response, got {train:?}");
    };
    assert_eq!(reports.len(), 4);

    let predict = roundtrip(
        &mut stream,
        r#"{"op":"predict","input":{"yearsExperience":4,"educationLevel":"Master's","jobTitle":"Data Scientist","location":"Bangalore","companySize":"Large","skills":["Python","SQL"],"industry":"Technology","workMode":"Hybrid"}}"#,
    )
    .await?;
    let Response::Predict {
        prediction,
        best_model,
    } = predict
    else {
        panic!("expected a predict response, got {predict:?}");
    };
    assert!(prediction.is_finite());
    assert!(!best_model.is_empty());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn data_and_stats_need_no_training() -> io::Result<()> {
    let mut stream = spawn_frontend().await?;

    let data = roundtrip(&mut stream, r#"{"op":"data"}"#).await?;
    let Response::Data { records } = data else {
        panic!("expected a data response, got {data:?}");
    };
    assert_eq!(records.len(), 35);

    let stats = roundtrip(&mut stream, r#"{"op":"stats"}"#).await?;
    let Response::Stats { summary } = stats else {
        panic!("expected a stats response, got {stats:?}");
    };
    assert_eq!(summary.total_records, 35);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_request_yields_error_response() -> io::Result<()> {
    let mut stream = spawn_frontend().await?;

    let resp = roundtrip(&mut stream, r#"{"op":"launch"}"#).await?;
    assert!(matches!(resp, Response::Error { .. }));

    // The connection survives a bad request.
    let resp = roundtrip(&mut stream, r#"{"op":"status"}"#).await?;
    assert!(matches!(resp, Response::Status { .. }));

    Ok(())
}
