use cdcr::error::dependency::DependencyError;
use cdcr::probe::policy::ProbePolicy;
use cdcr::probe::readiness::{await_ready, Probe};
use cdcr::probe::tcp::TcpProbe;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_open_port_is_reachable_first_time() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let probe = TcpProbe::new("127.0.0.1", port, Duration::from_secs(1));
    assert_eq!(probe.target(), format!("127.0.0.1:{}", port));

    let result = await_ready(&probe, &ProbePolicy::new(3, Duration::from_millis(10)))
        .await
        .unwrap();
    assert!(result.reachable);
    assert_eq!(result.attempts_used, 1);
    assert_eq!(result.last_error, None);
}

#[tokio::test]
async fn test_closed_port_times_out_after_all_attempts() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let probe = TcpProbe::new("127.0.0.1", port, Duration::from_secs(1));
    let err = await_ready(&probe, &ProbePolicy::new(2, Duration::from_millis(10)))
        .await
        .unwrap_err();

    match err {
        DependencyError::Timeout {
            target,
            attempts_used,
            last_error,
        } => {
            assert_eq!(target, format!("127.0.0.1:{}", port));
            assert_eq!(attempts_used, 2);
            assert!(last_error.is_some());
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_port_opening_late_is_picked_up() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let opener = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let listener = TcpListener::bind(addr).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(listener);
    });

    let probe = TcpProbe::new("127.0.0.1", addr.port(), Duration::from_secs(1));
    let result = await_ready(&probe, &ProbePolicy::new(40, Duration::from_millis(50)))
        .await
        .unwrap();
    assert!(result.reachable);
    assert!(result.attempts_used > 1);
    opener.abort();
}
