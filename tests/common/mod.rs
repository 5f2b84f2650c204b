//! Shared helpers for router-level tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use flowpanel::{
    create_app, AppState, CommandOutput, CommandRunner, PanelConfig, PulseCounter, WebConfig,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

pub const HOSTAPD_CONF: &str = "interface=wlan0_ap\n\
driver=nl80211\n\
ssid=PanelAP\n\
hw_mode=g\n\
channel=6\n\
wpa=2\n\
wpa_passphrase=oldsecret\n";

/// Fake OS tools keyed by command line. `mv` is performed for real.
#[derive(Default)]
pub struct FakeTools {
    replies: Mutex<HashMap<String, CommandOutput>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTools {
    /// Tools describing a Pi on "HomeNet" with its access point up.
    pub fn healthy(ap_interface: &str) -> Self {
        Self::default()
            .reply(
                "ip link show wlan0",
                "3: wlan0: <BROADCAST,MULTICAST,UP> mtu 1500 state UP\n    link/ether b8:27:eb:12:34:56 brd ff:ff:ff:ff:ff:ff\n",
            )
            .reply(
                "nmcli -t -f ACTIVE,SSID dev wifi",
                "no:Cafe\nyes:HomeNet\nno:Neighbour\n",
            )
            .reply(
                "nmcli -t -f SSID dev wifi",
                "Neighbour\nHomeNet\n\nCafe\nHomeNet\n",
            )
            .reply(
                &format!("ip addr show {}", ap_interface),
                &format!("4: {}: <BROADCAST,MULTICAST,UP> mtu 1500 state UP\n", ap_interface),
            )
    }

    pub fn reply(self, command_line: &str, stdout: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(command_line.to_string(), CommandOutput::ok(stdout));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeTools {
    async fn run(&self, program: &str, args: &[&str]) -> flowpanel::Result<CommandOutput> {
        let mut line = vec![program];
        line.extend_from_slice(args);
        let key = line.join(" ");
        self.calls.lock().unwrap().push(key.clone());

        if let Some(output) = self.replies.lock().unwrap().get(&key) {
            return Ok(output.clone());
        }

        let words: Vec<&str> = line.iter().copied().skip_while(|w| *w == "sudo").collect();
        match words.as_slice() {
            ["mv", from, to] => Ok(match std::fs::rename(from, to) {
                Ok(()) => CommandOutput::ok(""),
                Err(e) => CommandOutput::failed(1, e.to_string()),
            }),
            ["systemctl", "restart", _] => Ok(CommandOutput::ok("")),
            _ => Ok(CommandOutput::failed(127, format!("{}: command not found", program))),
        }
    }
}

/// A router wired to temp files and fake tools.
pub struct Harness {
    pub app: Router,
    pub state: AppState,
    pub tools: Arc<FakeTools>,
    pub dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    pub fn with_config(customize: impl FnOnce(PanelConfig) -> PanelConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hostapd.conf"), HOSTAPD_CONF).unwrap();

        let config = customize(
            PanelConfig::default()
                .with_flow_config_path(dir.path().join("flow_config.json"))
                .with_hostapd_conf_path(dir.path().join("hostapd.conf"))
                .with_temp_dir(dir.path()),
        );
        let tools = Arc::new(FakeTools::healthy(&config.ap_interface));
        let counter = Arc::new(PulseCounter::new(config.liters_per_pulse));
        let state = AppState::with_runner(config, counter, tools.clone());
        let app = create_app(state.clone(), &WebConfig::default());

        Self {
            app,
            state,
            tools,
            dir,
        }
    }

    pub fn hostapd_path(&self) -> PathBuf {
        self.dir.path().join("hostapd.conf")
    }

    pub fn flow_config_path(&self) -> PathBuf {
        self.dir.path().join("flow_config.json")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(form.to_string())).unwrap())
            .await
    }

    /// Log in with the WiFi password and return the cookie to send back.
    pub async fn login(&self) -> String {
        let response = self.post_form("/wifi-auth", "password=3333", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("login should set a session cookie")
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// `name=value` part of the first Set-Cookie header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(|pair| pair.trim().to_string())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
