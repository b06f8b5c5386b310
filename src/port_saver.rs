use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Reports the port Rocket actually bound to, which matters when it was
/// asked for port 0.
pub fn create_pair() -> (PortSaver, Port) {
    let (tx, rx) = oneshot::channel();
    let port_saver = PortSaver::new(tx);
    let port = Port::new(rx);
    (port_saver, port)
}

pub struct Port {
    port: Option<u16>,
    rx: Option<oneshot::Receiver<u16>>,
}

impl Port {
    fn new(rx: oneshot::Receiver<u16>) -> Port {
        Port {
            port: None,
            rx: Some(rx),
        }
    }

    /// Waits for liftoff. `None` if the server went away before binding.
    pub async fn get(&mut self) -> Option<u16> {
        if self.port.is_none() {
            if let Some(rx) = self.rx.take() {
                self.port = rx.await.ok();
            }
        }
        self.port
    }
}

pub struct PortSaver {
    sender: Mutex<Option<oneshot::Sender<u16>>>,
}

impl PortSaver {
    fn new(sender: oneshot::Sender<u16>) -> PortSaver {
        PortSaver {
            sender: Mutex::new(Some(sender)),
        }
    }
}

#[rocket::async_trait]
impl Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let sender = match self.sender.lock() {
            Ok(mut sender) => sender.take(),
            Err(_) => None,
        };
        if let Some(sender) = sender {
            let _ = sender.send(rocket.config().port);
        }
    }
}
