use event_dispatch::prelude::*;
use std::sync::mpsc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Ping {
    message: String,
}

impl Event for Ping {
    fn event_type() -> &'static str {
        "Ping"
    }
}

struct Printer;

impl Listener for Printer {
    type Event = Ping;

    fn handle(&self, event: &Ping) -> Result<()> {
        println!("Received: {}", event.message);
        Ok(())
    }

    fn name(&self) -> &str {
        "printer"
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    // Synchronous delivery on the shared dispatcher
    let shared = Dispatcher::synchronised();
    let printer = ListenerEntry::new(Printer);
    shared.register(&printer);

    shared.post(&Ping {
        message: "Hello!".into(),
    })?;
    shared.defer_post(Ping {
        message: "Deferred, but delivered inline".into(),
    })?;

    // Deferred delivery on the single-threaded dispatcher
    let local = Dispatcher::unsynchronised();
    let (done_tx, done_rx) = mpsc::channel();
    let done_tx = std::sync::Mutex::new(done_tx);

    local.register(&printer);
    local.register(&ListenerEntry::named("notifier", move |_: &Ping| {
        let _ = done_tx.lock().map(|tx| tx.send(()));
        Ok(())
    }));

    local.defer_post(Ping {
        message: "Delivered on a worker thread".into(),
    })?;

    if done_rx.recv_timeout(Duration::from_secs(5)).is_err() {
        eprintln!("deferred delivery did not finish in time");
    }

    println!("{}", shared.stats());
    println!("{}", local.stats());
    Ok(())
}
