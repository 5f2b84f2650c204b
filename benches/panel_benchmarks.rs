use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowpanel::{
    network::inspector::{parse_active_ssid, parse_ssid_list},
    rewrite_hostapd_config, NetworkSnapshot, PulseCounter,
};
use std::sync::Arc;

/// Benchmark the interrupt-path increment and the volume read
fn bench_pulse_counter(c: &mut Criterion) {
    let counter = Arc::new(PulseCounter::default());

    c.bench_function("pulse_increment", |b| b.iter(|| counter.on_rising_edge()));

    c.bench_function("current_volume", |b| {
        b.iter(|| black_box(counter.current_volume()))
    });
}

/// Benchmark nmcli output parsing at different scan sizes
fn bench_scan_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_ssid_list");

    for size in [10, 50, 200].iter() {
        let output: String = (0..*size)
            .map(|i| format!("Network-{}\n", i % (size / 2)))
            .collect();

        group.bench_with_input(BenchmarkId::new("networks", size), &output, |b, output| {
            b.iter(|| parse_ssid_list(black_box(output)))
        });
    }

    group.finish();

    let active: String = (0..50)
        .map(|i| format!("no:Network-{}\n", i))
        .chain(std::iter::once("yes:Shop\\:Floor\n".to_string()))
        .collect();
    c.bench_function("parse_active_ssid", |b| {
        b.iter(|| parse_active_ssid(black_box(&active)))
    });
}

/// Benchmark the hostapd rewrite on a typical config
fn bench_hostapd_rewrite(c: &mut Criterion) {
    let conf = "interface=wlan0_ap\ndriver=nl80211\nssid=PanelAP\nhw_mode=g\nchannel=6\n\
                wmm_enabled=0\nmacaddr_acl=0\nauth_algs=1\nignore_broadcast_ssid=0\nwpa=2\n\
                wpa_passphrase=oldsecret\nwpa_key_mgmt=WPA-PSK\nrsn_pairwise=CCMP\n";

    c.bench_function("rewrite_hostapd_config", |b| {
        b.iter(|| rewrite_hostapd_config(black_box(conf), "Workshop", "pulses123"))
    });
}

/// Benchmark JSON serialization of the network snapshot
fn bench_snapshot_serialization(c: &mut Criterion) {
    let snapshot = NetworkSnapshot {
        current_mac: "b8:27:eb:12:34:56".to_string(),
        current_ssid: "HomeNet".to_string(),
        available_networks: (0..30).map(|i| format!("Network-{}", i)).collect(),
        ap_status: true,
        ap_ssid: "PanelAP".to_string(),
    };

    c.bench_function("snapshot_json_serialization", |b| {
        b.iter(|| serde_json::to_string(black_box(&snapshot)).expect("Should serialize"))
    });
}

criterion_group!(
    benches,
    bench_pulse_counter,
    bench_scan_parsing,
    bench_hostapd_rewrite,
    bench_snapshot_serialization
);
criterion_main!(benches);
