use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use parking_lot::Mutex;
use qadmin::{Access, Admin, Config, ConsoleHost, PlayerInfo, SessionId};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

fn populated_admin() -> Admin<ConsoleHost> {
    let mut admin = Admin::new(Config::default(), ConsoleHost::new());
    for slot in 0..32 {
        let info = PlayerInfo::new(format!("10.0.0.{slot}:27960"), format!("G{slot}"), format!("^{}Player{slot}", slot % 8));
        admin.on_connect(SessionId(slot), &info);
    }
    if let Some(record) = admin.state_mut().players.get_mut(SessionId(0)) {
        record.access = Access(u32::MAX);
    }
    admin
}

fn line(text: &str) -> Vec<String> {
    qadmin_proto::split_args(text)
}

// Per-command overhead: lookup, access check, handler and effect delivery.
fn dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let mut admin = populated_admin();
    let passthrough = line("kill");
    group.bench_function("passthrough", |b| {
        b.iter(|| admin.on_command(black_box(SessionId(3)), black_box(&passthrough)))
    });

    let chat = line("say hello everyone");
    group.bench_function("say_plain", |b| {
        b.iter(|| admin.on_command(black_box(SessionId(3)), black_box(&chat)))
    });

    let userlist = line("admin_userlist player1");
    group.bench_function("userlist", |b| {
        b.iter(|| {
            let verdict = admin.on_command(black_box(SessionId(0)), black_box(&userlist));
            admin.host_mut().drain_output();
            verdict
        })
    });

    let gag = line("admin_gag player17");
    let ungag = line("admin_ungag player17");
    group.bench_function("gag_cycle", |b| {
        b.iter(|| {
            admin.on_command(SessionId(0), black_box(&gag));
            admin.on_command(SessionId(0), black_box(&ungag));
            admin.host_mut().drain_output();
        })
    });

    group.finish();
}

// Whole-script throughput through the async driver.
fn script_benchmark(c: &mut Criterion) {
    let mut script = String::new();
    for slot in 0..16 {
        script.push_str(&format!("connect {slot} 10.0.1.{slot} G{slot} Bot{slot}\n"));
        script.push_str(&format!("cmd {slot} say hello from {slot}\n"));
    }
    script.push_str("console admin_userlist\n");

    let mut group = c.benchmark_group("script");
    group.throughput(Throughput::Bytes(script.len() as u64));

    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let script = script.as_str();
    group.bench_function("run", |b| {
        b.to_async(&rt).iter(|| async move {
            let admin = Arc::new(Mutex::new(Admin::new(Config::default(), ConsoleHost::new())));
            let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
            qadmin::console::run(admin, script.as_bytes(), Duration::from_secs(3600), tx)
                .await
                .expect("script runs");
        })
    });

    group.finish();
}

criterion_group!(benches, dispatch_benchmark, script_benchmark);
criterion_main!(benches);
