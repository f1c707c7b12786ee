use minijinja::{context, Environment};
use serde::Serialize;

use crate::registry::DeviceRecord;

// Registered without an `.html` suffix so minijinja does not auto-escape: record
// fields are already escaped when the check-in is accepted.
const DASHBOARD_TEMPLATE_NAME: &str = "dashboard";

const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>ESP32 Class Hub</title>
    <meta http-equiv="refresh" content="{{ refresh_secs }}">
    <style>
        body { font-family: 'Courier New', monospace; background-color: #1a1a1a; color: #00ff00; padding: 20px; }
        h1 { border-bottom: 2px solid #00ff00; padding-bottom: 10px; }
        .device-card { border: 1px solid #00ff00; margin: 10px 0; padding: 10px; border-radius: 5px; background: #222; }
        .device-header { font-weight: bold; font-size: 1.2em; }
        .timestamp { color: #888; font-size: 0.8em; }
        .message { color: #fff; margin-top: 5px; }
    </style>
</head>
<body>
    <h1>&gt; SYSTEM MONITOR: ESP32 CONNECTIONS</h1>
    <div id="device-list">
    {%- if devices %}
        {%- for device in devices %}
        <div class="device-card">
            <div class="device-header">ID: {{ device.id }} <span style="font-size:0.8em">({{ device.mac }})</span></div>
            <div class="message">Input: "{{ device.message }}"</div>
            <div class="timestamp">Last Seen: {{ device.last_seen }}</div>
        </div>
        {%- endfor %}
    {%- else %}
        <p>Waiting for devices...</p>
    {%- endif %}
    </div>
</body>
</html>
"#;

#[derive(Serialize)]
struct DeviceCard<'a> {
    id: &'a str,
    mac: &'a str,
    message: &'a str,
    last_seen: String,
}

pub struct Dashboard {
    env: Environment<'static>,
    refresh_secs: u32,
}

impl Dashboard {
    pub fn new(refresh_secs: u32) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(DASHBOARD_TEMPLATE_NAME, DASHBOARD_TEMPLATE)?;
        Ok(Self { env, refresh_secs })
    }

    /// Renders the device list in the order given.
    pub fn render(&self, devices: &[(String, DeviceRecord)]) -> Result<String, minijinja::Error> {
        let cards: Vec<DeviceCard<'_>> = devices
            .iter()
            .map(|(_, record)| DeviceCard {
                id: &record.id,
                mac: &record.mac,
                message: &record.message,
                last_seen: record.last_seen.format("%H:%M:%S").to_string(),
            })
            .collect();

        self.env
            .get_template(DASHBOARD_TEMPLATE_NAME)?
            .render(context! {
                devices => cards,
                refresh_secs => self.refresh_secs,
            })
    }
}
