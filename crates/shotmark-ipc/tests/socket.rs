// Author: Dustin Pilgrim
// License: MIT

use std::thread;
use std::time::{Duration, Instant};

use shotmark_core::{Effect, InputEvent, Mode, PointerEvent};
use shotmark_ipc::{
    ClientConn, Event, IpcClient, IpcError, IpcServer, Request, Response, SessionStatus,
};

fn wait_accept(server: &IpcServer) -> ClientConn {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(conn) = server.try_accept().unwrap() {
            return conn;
        }
        assert!(Instant::now() < deadline, "no client connected");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn status_and_events_over_socket() {
    let dir = tempfile::tempdir().unwrap();
    let sock = dir.path().join("shotmark.sock");
    let server = IpcServer::bind(&sock).unwrap();
    assert!(server.try_accept().unwrap().is_none());

    let handle = thread::spawn(move || {
        let mut conn = wait_accept(&server);
        conn.handshake().unwrap();

        assert!(matches!(conn.recv().unwrap(), Request::Status));
        conn.send_event(Event::Shown).unwrap();
        conn.send(Response::Status(SessionStatus {
            visible: true,
            mode: Mode::Normal,
            section: None,
            annotations: 0,
        }))
        .unwrap();

        match conn.recv().unwrap() {
            Request::Input { event: InputEvent::PointerDown(p) } => assert_eq!(p.point.x, 5),
            other => panic!("unexpected {other:?}"),
        }
        conn.send(Response::Effects {
            effects: vec![Effect::Repaint],
        })
        .unwrap();

        assert!(matches!(conn.recv().unwrap(), Request::Hide));
        conn.send(Response::Error {
            message: "not visible".into(),
        })
        .unwrap();
    });

    let mut client = IpcClient::connect(&sock).unwrap();
    client.set_timeout(Some(Duration::from_secs(5))).unwrap();

    let st = client.status().unwrap();
    assert!(st.visible);
    assert_eq!(client.drain_events(), vec![Event::Shown]);

    let effects = client
        .send_input(InputEvent::PointerDown(PointerEvent::primary(5, 5)))
        .unwrap();
    assert_eq!(effects, vec![Effect::Repaint]);

    let err = client.call(Request::Hide).unwrap_err();
    assert!(matches!(err, IpcError::Remote(m) if m == "not visible"));

    handle.join().unwrap();
}

#[test]
fn version_mismatch_is_reported_to_client() {
    use shotmark_ipc::framing::{send_msg, recv_msg, MAX_FRAME};
    use shotmark_ipc::{IpcHello, Wire};
    use std::os::unix::net::UnixStream;

    let dir = tempfile::tempdir().unwrap();
    let sock = dir.path().join("v.sock");
    let server = IpcServer::bind(&sock).unwrap();

    let handle = thread::spawn(move || {
        let mut conn = wait_accept(&server);
        assert!(matches!(conn.handshake(), Err(IpcError::VersionMismatch { client: 99, .. })));
    });

    let mut stream = UnixStream::connect(&sock).unwrap();
    send_msg(&mut stream, &Request::Hello(IpcHello { version: 99 })).unwrap();
    let reply: Wire = recv_msg(&mut stream, MAX_FRAME).unwrap();
    assert!(matches!(reply, Wire::Response(Response::Error { .. })));

    handle.join().unwrap();
}

#[test]
fn dropping_server_removes_socket() {
    let dir = tempfile::tempdir().unwrap();
    let sock = dir.path().join("gone.sock");
    {
        let _server = IpcServer::bind(&sock).unwrap();
        assert!(sock.exists());
    }
    assert!(!sock.exists());
}
