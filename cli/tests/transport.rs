//! Drives the CLI against the live mock server.
//!
//! The `league` binary builds a fresh `UreqTransport` per process, so its
//! cookie jar never outlives one invocation. Tests that share one transport
//! across several calls to `run` exercise the jar inside a single process
//! only.

use clap::Parser;
use league_cli::{run, Cli, Exit, UreqTransport};
use league_core::LeagueApi;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Parse `args` as a `league` invocation aimed at `base` and run it.
fn invoke(api: &LeagueApi<UreqTransport>, base: &str, args: &[&str]) -> (Exit, String) {
    let mut argv = vec!["league", "--base-url", base];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let exit = run(&cli, api, &mut out).unwrap();
    (exit, String::from_utf8(out).unwrap())
}

#[test]
fn shared_transport_keeps_cookie_across_runs() {
    let base = start_server();
    let api = LeagueApi::new(&base, UreqTransport::new());
    let creds = ["--email", "ana@example.com", "--password", "pw"];

    let mut args = vec!["register", "--name", "Ana"];
    args.extend_from_slice(&creds);
    let (exit, out) = invoke(&api, &base, &args);
    assert_eq!(exit, Exit::Success, "{out}");
    assert!(out.contains("User registered successfully"));

    let (exit, out) = invoke(&api, &base, &["leagues"]);
    assert_eq!(exit, Exit::LoginRequired, "{out}");

    let mut args = vec!["login"];
    args.extend_from_slice(&creds);
    let (exit, out) = invoke(&api, &base, &args);
    assert_eq!(exit, Exit::Success, "{out}");
    assert!(out.contains("next: /static/leagues.html"));

    // Same transport, no credentials: the jar still holds the login cookie.
    let (exit, out) = invoke(&api, &base, &["leagues"]);
    assert_eq!(exit, Exit::Success, "{out}");
    assert!(out.contains("Spring Dice League"));

    let (exit, out) = invoke(&api, &base, &["create-team", "1", "Owls"]);
    assert_eq!(exit, Exit::Success, "{out}");
    assert!(out.contains("Team created successfully"));
    assert!(out.contains("Owls (owner: Ana, members: 1)"));

    let (exit, _) = invoke(&api, &base, &["logout"]);
    assert_eq!(exit, Exit::Success);
    let (exit, out) = invoke(&api, &base, &["details", "1"]);
    assert_eq!(exit, Exit::LoginRequired);
    assert!(out.contains("Session expired"));
}

#[test]
fn global_credentials_sign_in_first() {
    let base = start_server();
    let api = LeagueApi::new(&base, UreqTransport::new());
    invoke(
        &api,
        &base,
        &["register", "--name", "Ben", "--email", "ben@example.com", "--password", "pw"],
    );

    let fresh = LeagueApi::new(&base, UreqTransport::new());
    let (exit, out) = invoke(
        &fresh,
        &base,
        &["details", "1", "--email", "ben@example.com", "--password", "pw"],
    );
    assert_eq!(exit, Exit::Success, "{out}");
    assert!(out.contains("Spring Dice League (2025)"));
    assert!(out.contains("your role: viewer"));
}

#[test]
fn fresh_transport_starts_signed_out() {
    let base = start_server();
    let api = LeagueApi::new(&base, UreqTransport::new());
    invoke(
        &api,
        &base,
        &["register", "--name", "Dee", "--email", "dee@example.com", "--password", "pw"],
    );
    let (exit, _) = invoke(
        &api,
        &base,
        &["login", "--email", "dee@example.com", "--password", "pw"],
    );
    assert_eq!(exit, Exit::Success);

    // What a second `league leagues` process sees.
    let next_process = LeagueApi::new(&base, UreqTransport::new());
    let (exit, out) = invoke(&next_process, &base, &["leagues"]);
    assert_eq!(exit, Exit::LoginRequired, "{out}");
}

#[test]
fn bad_credentials_fail_before_command() {
    let base = start_server();
    let api = LeagueApi::new(&base, UreqTransport::new());
    let (exit, out) = invoke(
        &api,
        &base,
        &["leagues", "--email", "nobody@example.com", "--password", "x"],
    );
    assert_eq!(exit, Exit::Failure);
    assert_eq!(out.trim(), "Invalid email or password");
}

#[test]
fn status_against_unreachable_server() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = format!("http://127.0.0.1:{port}");
    let api = LeagueApi::new(&base, UreqTransport::new());
    let (exit, out) = invoke(&api, &base, &["status"]);
    assert_eq!(exit, Exit::Failure);
    assert_eq!(out.trim(), league_core::NETWORK_ERROR_MESSAGE);
}
