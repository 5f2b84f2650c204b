//! Server-rendered HTML pages.

use crate::flow::FlowConfig;
use crate::network::NetworkSnapshot;

/// Render the main dashboard.
pub fn dashboard(config: &FlowConfig, network: &NetworkSnapshot, liters: f64) -> String {
    let body = format!(
        r#"<div class="card">
            <h3>Flowmeter</h3>
            <div class="metric">
                <span class="metric-label">Liters flowed</span>
                <span class="metric-value" id="liters">{liters:.3}</span>
            </div>
            <form method="post" action="/">
                <input type="hidden" name="reset_flow" value="1">
                <button type="submit">Reset counter</button>
            </form>
        </div>
        <div class="card">
            <h3>Settings</h3>
            <form method="post" action="/">
                <label>Density <input type="text" name="density" value="{density}"></label>
                <label>Magnet offset <input type="text" name="magnet_offset" value="{magnet_offset}"></label>
                <button type="submit">Save</button>
            </form>
        </div>
        {network}
        <div class="card">
            <h3>WiFi</h3>
            <a href="/wifi-settings">Access point settings</a>
        </div>
        <script>{script}</script>"#,
        liters = liters,
        density = escape_html(&config.density),
        magnet_offset = escape_html(&config.magnet_offset),
        network = network_card(network),
        script = LITERS_POLL_SCRIPT,
    );
    layout("Flow Panel", &body)
}

/// Render the password prompt, optionally with an error message.
pub fn wifi_auth(error: Option<&str>) -> String {
    let error = error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default();
    let body = format!(
        r#"<div class="card">
            <h3>WiFi settings login</h3>
            {error}
            <form method="post" action="/wifi-auth">
                <label>Password <input type="password" name="password" autofocus></label>
                <button type="submit">Continue</button>
            </form>
        </div>"#,
    );
    layout("WiFi Login", &body)
}

/// Render the access-point edit form.
pub fn wifi_settings(network: &NetworkSnapshot) -> String {
    let body = format!(
        r#"{network}
        <div class="card">
            <h3>Access point</h3>
            <form method="post" action="/wifi-settings">
                <label>Network name <input type="text" name="ap_ssid" value="{ap_ssid}" required></label>
                <label>Password <input type="password" name="ap_password" minlength="8" required></label>
                <button type="submit">Apply</button>
            </form>
            <a href="/">Back to dashboard</a>
        </div>"#,
        network = network_card(network),
        ap_ssid = escape_html(&network.ap_ssid),
    );
    layout("WiFi Settings", &body)
}

fn network_card(network: &NetworkSnapshot) -> String {
    let networks: String = network
        .available_networks
        .iter()
        .map(|ssid| format!("<li>{}</li>", escape_html(ssid)))
        .collect();
    let ap = if network.ap_status {
        format!("Active ({})", escape_html(&network.ap_ssid))
    } else {
        "Inactive".to_string()
    };

    format!(
        r#"<div class="card">
            <h3>Network</h3>
            <div class="metric"><span class="metric-label">MAC</span><span class="metric-value">{mac}</span></div>
            <div class="metric"><span class="metric-label">Connected to</span><span class="metric-value">{ssid}</span></div>
            <div class="metric"><span class="metric-label">Access point</span><span class="metric-value">{ap}</span></div>
            <h4>Available networks</h4>
            <ul>{networks}</ul>
        </div>"#,
        mac = escape_html(&network.current_mac),
        ssid = escape_html(&network.current_ssid),
        ap = ap,
        networks = networks,
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <div class="header"><h1>{title}</h1></div>
        {body}
    </div>
</body>
</html>"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f2f4f8;
            color: #333;
            padding: 20px;
        }
        .container { max-width: 720px; margin: 0 auto; }
        .header { text-align: center; margin-bottom: 24px; }
        .card {
            background: white;
            border-radius: 12px;
            padding: 20px;
            margin-bottom: 16px;
            box-shadow: 0 4px 12px rgba(0,0,0,0.08);
        }
        .card h3 { color: #3a6ea5; margin-bottom: 12px; }
        .metric { display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #eee; }
        .metric-label { font-weight: 600; color: #666; }
        .metric-value { font-weight: bold; }
        label { display: block; margin: 8px 0; }
        input { padding: 6px; margin-left: 8px; }
        button { margin-top: 8px; padding: 6px 14px; }
        ul { margin-left: 20px; }
        .error { color: #c0392b; margin-bottom: 8px; }
"#;

const LITERS_POLL_SCRIPT: &str = r#"
        setInterval(function () {
            fetch('/get_liters')
                .then(function (response) { return response.json(); })
                .then(function (data) {
                    document.getElementById('liters').textContent = data.liters.toFixed(3);
                })
                .catch(function (error) { console.error('Failed to fetch liters:', error); });
        }, 1000);
"#;
