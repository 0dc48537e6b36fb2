//! Effect executor - runs reducer-requested side effects on tokio and
//! reports completions back through the event channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

use polkasend_client::{units, ChainClient, ClientError, Vault};

use crate::config::AppConfig;
use crate::core::{Effect, Event};

pub struct EffectExecutor {
    runtime: tokio::runtime::Handle,
    events: mpsc::UnboundedSender<Event>,
    vault: Arc<Vault>,

    /// Current client handle; `None` until a connect resolves and between
    /// teardown and the next successful dial.
    client: Arc<RwLock<Option<ChainClient>>>,

    /// Highest generation a connect was requested for. An older connect
    /// that resolves late must not install its handle over a newer one.
    latest_generation: Arc<AtomicU64>,
}

impl EffectExecutor {
    pub fn new(
        runtime: tokio::runtime::Handle,
        events: mpsc::UnboundedSender<Event>,
        vault: Arc<Vault>,
    ) -> Self {
        Self {
            runtime,
            events,
            vault,
            client: Arc::new(RwLock::new(None)),
            latest_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Enumerate vault accounts off the UI thread. An empty vault reports
    /// an empty set, not an error.
    pub fn load_accounts(&self) {
        let vault = self.vault.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let accounts = vault.accounts();
            info!("vault enumeration returned {} account(s)", accounts.len());
            let _ = events.send(Event::AccountsLoaded(accounts));
        });
    }

    pub fn execute(&self, effect: Effect) {
        match effect {
            Effect::Connect {
                generation,
                endpoint,
            } => self.connect(generation, endpoint),
            Effect::LoadBalances {
                generation,
                addresses,
            } => self.load_balances(generation, addresses),
            Effect::BuildTransfer { recipient } => self.build_transfer(recipient),
            Effect::SignTransfer { raw_hex, address } => self.sign_transfer(raw_hex, address),
            Effect::SubmitTransfer { signed_hex } => self.submit_transfer(signed_hex),
            Effect::PersistEndpoint(endpoint) => persist_endpoint(endpoint),
        }
    }

    fn connect(&self, generation: u64, endpoint: String) {
        // recorded synchronously so an older in-flight dial can tell it
        // has been superseded before it installs anything
        self.latest_generation.store(generation, Ordering::SeqCst);

        let events = self.events.clone();
        let slot = self.client.clone();
        let latest = self.latest_generation.clone();

        self.runtime.spawn(async move {
            if latest.load(Ordering::SeqCst) == generation {
                // tear down: drop the previous handle, no close call
                *slot.write().await = None;
            }

            match ChainClient::connect(&endpoint).await {
                Ok(client) => {
                    if latest.load(Ordering::SeqCst) == generation {
                        *slot.write().await = Some(client);
                    }
                    let _ = events.send(Event::ClientReady {
                        generation,
                        endpoint,
                    });
                }
                Err(e) => {
                    let _ = events.send(Event::ClientFailed {
                        generation,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    fn load_balances(&self, generation: u64, addresses: Vec<String>) {
        for address in addresses {
            let events = self.events.clone();
            let slot = self.client.clone();
            self.runtime.spawn(async move {
                let client = slot.read().await.clone();
                let Some(client) = client else {
                    let _ = events.send(Event::BalanceFailed {
                        generation,
                        address,
                        error: "no node connection".into(),
                    });
                    return;
                };
                match client.free_balance(&address).await {
                    Ok(planck) => {
                        let _ = events.send(Event::BalanceUpdated {
                            generation,
                            address,
                            display: units::format_balance(planck),
                        });
                    }
                    Err(e) => {
                        let _ = events.send(Event::BalanceFailed {
                            generation,
                            address,
                            error: e.to_string(),
                        });
                    }
                }
            });
        }
    }

    fn build_transfer(&self, recipient: String) {
        let events = self.events.clone();
        let slot = self.client.clone();
        self.runtime.spawn(async move {
            let client = slot.read().await.clone();
            let Some(client) = client else {
                let _ = events.send(Event::BuildFailed {
                    error: "no node connection".into(),
                });
                return;
            };
            match client.transfer_call_data(&recipient, units::TRANSFER_AMOUNT) {
                Ok(call) => {
                    let _ = events.send(Event::RawBuilt {
                        raw_hex: units::to_hex(&call),
                    });
                }
                Err(e) => {
                    let _ = events.send(Event::BuildFailed {
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    fn sign_transfer(&self, raw_hex: String, address: String) {
        let events = self.events.clone();
        let slot = self.client.clone();
        let vault = self.vault.clone();
        self.runtime.spawn(async move {
            let Some(signer) = vault.signer_for(&address) else {
                let _ = events.send(Event::SignFailed {
                    error: ClientError::NoSender(address).to_string(),
                });
                return;
            };
            let client = slot.read().await.clone();
            let Some(client) = client else {
                let _ = events.send(Event::SignFailed {
                    error: "no node connection".into(),
                });
                return;
            };
            let call = match units::from_hex(&raw_hex) {
                Ok(call) => call,
                Err(e) => {
                    let _ = events.send(Event::SignFailed {
                        error: e.to_string(),
                    });
                    return;
                }
            };
            match client.sign_call_data(call, &signer).await {
                Ok(signed) => {
                    let _ = events.send(Event::SignedReady {
                        signed_hex: units::to_hex(&signed),
                    });
                }
                Err(e) => {
                    let _ = events.send(Event::SignFailed {
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    fn submit_transfer(&self, signed_hex: String) {
        let events = self.events.clone();
        let slot = self.client.clone();
        self.runtime.spawn(async move {
            let client = slot.read().await.clone();
            let Some(client) = client else {
                let _ = events.send(Event::SubmitFailed {
                    error: "no node connection".into(),
                });
                return;
            };
            let tx_bytes = match units::from_hex(&signed_hex) {
                Ok(bytes) => bytes,
                Err(e) => {
                    let _ = events.send(Event::SubmitFailed {
                        error: e.to_string(),
                    });
                    return;
                }
            };
            match client.submit_signed(tx_bytes).await {
                Ok(hash) => {
                    info!("submitted extrinsic {}", hash);
                    let _ = events.send(Event::Submitted { hash });
                }
                Err(e) => {
                    let _ = events.send(Event::SubmitFailed {
                        error: e.to_string(),
                    });
                }
            }
        });
    }
}

fn persist_endpoint(endpoint: String) {
    let config = AppConfig { endpoint };
    if let Err(e) = config.save() {
        warn!("could not persist endpoint: {:#}", e);
    }
}
