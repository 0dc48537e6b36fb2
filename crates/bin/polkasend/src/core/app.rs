//! Core application logic - a pure reducer over events.
//!
//! The shell feeds every user interaction and async completion through
//! `AppCore::update`, which mutates the state and returns the side effects
//! to run. Nothing in here touches the network or the screen.

use std::collections::HashMap;

use polkasend_client::units;

use super::effect::Effect;
use super::event::Event;
use super::types::{AccountInfo, ConnectionState, Status, ViewModel};

pub struct AppCore {
    /// Last committed endpoint; the one the current generation dials.
    endpoint: String,
    /// Contents of the endpoint field (may differ until committed).
    endpoint_input: String,
    /// Bumped on every commit; stale completions are dropped against it.
    generation: u64,
    connection: ConnectionState,

    accounts: Vec<AccountInfo>,
    selected: Option<AccountInfo>,
    balances: HashMap<String, String>,

    recipient: String,
    raw_transaction: String,
    signed_transaction: String,
    status: Status,
}

impl AppCore {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint_input: endpoint.clone(),
            endpoint,
            generation: 0,
            connection: ConnectionState::Disconnected,
            accounts: Vec::new(),
            selected: None,
            balances: HashMap::new(),
            recipient: String::new(),
            raw_transaction: String::new(),
            signed_transaction: String::new(),
            status: Status::default(),
        }
    }

    /// First connection attempt, issued once before the frame loop starts.
    pub fn startup(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.connection = ConnectionState::Connecting;
        vec![Effect::Connect {
            generation: self.generation,
            endpoint: self.endpoint.clone(),
        }]
    }

    /// Pure update function - applies one event, returns effects to run.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        use Event::*;

        match event {
            // ===== Async completions =====
            AccountsLoaded(accounts) => {
                self.accounts = accounts;

                // selection must reference a current account; a dangling
                // one falls back to the first entry
                let still_present = self
                    .selected
                    .as_ref()
                    .map(|s| self.accounts.contains(s))
                    .unwrap_or(false);
                if !still_present {
                    self.selected = self.accounts.first().cloned();
                }

                self.status = Status::text(format!(
                    "Vault open: {} account(s)",
                    self.accounts.len()
                ));
                self.reload_balances()
            }

            ClientReady { generation, endpoint } => {
                if self.stale(generation) {
                    return vec![];
                }
                self.connection = ConnectionState::Connected;
                self.status = Status::text(format!("Connected to {}", endpoint));
                self.reload_balances()
            }

            ClientFailed { generation, error } => {
                if self.stale(generation) {
                    return vec![];
                }
                self.connection = ConnectionState::Disconnected;
                self.status = Status::text(format!("Connection failed: {}", error));
                vec![]
            }

            BalanceUpdated {
                generation,
                address,
                display,
            } => {
                if self.stale(generation) {
                    return vec![];
                }
                // merge exactly one entry; unrelated addresses untouched
                self.balances.insert(address, display);
                vec![]
            }

            BalanceFailed {
                generation,
                address,
                error,
            } => {
                if self.stale(generation) {
                    return vec![];
                }
                self.status =
                    Status::text(format!("Balance query failed for {}: {}", address, error));
                vec![]
            }

            RawBuilt { raw_hex } => {
                self.raw_transaction = raw_hex.clone();
                self.status = Status::text(format!("Raw created: {}", raw_hex));
                vec![]
            }

            BuildFailed { error } => {
                self.status = Status::text(format!("Error building transaction: {}", error));
                vec![]
            }

            SignedReady { signed_hex } => {
                self.signed_transaction = signed_hex;
                self.status = Status::text("Transaction signed");
                vec![]
            }

            SignFailed { error } => {
                self.status = Status::text(format!("Error signing transaction: {}", error));
                vec![]
            }

            Submitted { hash } => {
                // consumed exactly once; cleared only on success
                self.signed_transaction.clear();
                self.status = Status::link("Transaction sent.", units::explorer_url(&hash));
                self.reload_balances()
            }

            SubmitFailed { error } => {
                self.status = Status::text(format!("Error sending transaction: {}", error));
                vec![]
            }

            // ===== User interactions =====
            EndpointEdited(input) => {
                self.endpoint_input = input;
                vec![]
            }

            EndpointCommitted => {
                let url = self.endpoint_input.trim().to_string();
                if url.is_empty() {
                    return vec![];
                }
                // re-committing the active endpoint only matters as a
                // retry after a failure
                if url == self.endpoint && self.connection != ConnectionState::Disconnected {
                    return vec![];
                }
                self.endpoint = url.clone();
                self.generation += 1;
                self.connection = ConnectionState::Connecting;
                vec![
                    Effect::PersistEndpoint(url.clone()),
                    Effect::Connect {
                        generation: self.generation,
                        endpoint: url,
                    },
                ]
            }

            AccountSelected(account) => {
                if self.accounts.contains(&account) {
                    self.selected = Some(account);
                }
                vec![]
            }

            RecipientEdited(input) => {
                self.recipient = input;
                vec![]
            }

            RawEdited(input) => {
                self.raw_transaction = input;
                vec![]
            }

            SignedEdited(input) => {
                self.signed_transaction = input;
                vec![]
            }

            MakeRawClicked => {
                if self.recipient.trim().is_empty() {
                    return vec![];
                }
                if self.connection != ConnectionState::Connected {
                    self.status = Status::text("Node connection not ready");
                    return vec![];
                }
                vec![Effect::BuildTransfer {
                    recipient: self.recipient.trim().to_string(),
                }]
            }

            SignClicked => {
                if self.raw_transaction.trim().is_empty() {
                    return vec![];
                }
                // the sender must be a member of the current account set;
                // otherwise the vault is never consulted
                let sender = self
                    .selected
                    .clone()
                    .filter(|s| self.accounts.contains(s));
                let Some(sender) = sender else {
                    self.status = Status::text("Can not find sender");
                    return vec![];
                };
                vec![Effect::SignTransfer {
                    raw_hex: self.raw_transaction.trim().to_string(),
                    address: sender.address,
                }]
            }

            SendClicked => {
                if self.signed_transaction.trim().is_empty() {
                    return vec![];
                }
                vec![Effect::SubmitTransfer {
                    signed_hex: self.signed_transaction.trim().to_string(),
                }]
            }
        }
    }

    /// Snapshot for rendering.
    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            endpoint_input: self.endpoint_input.clone(),
            connection: self.connection,
            accounts: self.accounts.clone(),
            selected: self.selected.clone(),
            balances: self.balances.clone(),
            recipient: self.recipient.clone(),
            raw_transaction: self.raw_transaction.clone(),
            signed_transaction: self.signed_transaction.clone(),
            status: self.status.clone(),
        }
    }

    fn stale(&self, generation: u64) -> bool {
        generation != self.generation
    }

    /// One concurrent balance query per account, keyed to the current
    /// generation. Fired on client-ready and on account-set replacement,
    /// so no derived-key memoization is involved.
    fn reload_balances(&self) -> Vec<Effect> {
        if self.connection != ConnectionState::Connected || self.accounts.is_empty() {
            return vec![];
        }
        vec![Effect::LoadBalances {
            generation: self.generation,
            addresses: self.accounts.iter().map(|a| a.address.clone()).collect(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "wss://westend-rpc.polkadot.io/";

    fn account(address: &str) -> AccountInfo {
        AccountInfo {
            address: address.into(),
            source: "vault".into(),
        }
    }

    /// Core that has finished startup and connected.
    fn connected_core() -> AppCore {
        let mut core = AppCore::new(ENDPOINT.into());
        core.startup();
        core.update(Event::ClientReady {
            generation: 1,
            endpoint: ENDPOINT.into(),
        });
        core
    }

    #[test]
    fn startup_issues_one_connect() {
        let mut core = AppCore::new(ENDPOINT.into());
        let effects = core.startup();
        assert_eq!(
            effects,
            vec![Effect::Connect {
                generation: 1,
                endpoint: ENDPOINT.into()
            }]
        );
        assert_eq!(core.connection, ConnectionState::Connecting);
    }

    #[test]
    fn first_account_becomes_default_selection() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a"), account("addr-b")]));
        assert_eq!(core.selected, Some(account("addr-a")));
    }

    #[test]
    fn reenumeration_resets_dangling_selection() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a"), account("addr-b")]));
        core.update(Event::AccountSelected(account("addr-b")));
        assert_eq!(core.selected, Some(account("addr-b")));

        // addr-b disappears; selection falls back to the new first entry
        core.update(Event::AccountsLoaded(vec![account("addr-c")]));
        assert_eq!(core.selected, Some(account("addr-c")));
    }

    #[test]
    fn accounts_trigger_balance_load_when_connected() {
        let mut core = connected_core();
        let effects =
            core.update(Event::AccountsLoaded(vec![account("addr-a"), account("addr-b")]));
        assert_eq!(
            effects,
            vec![Effect::LoadBalances {
                generation: 1,
                addresses: vec!["addr-a".into(), "addr-b".into()],
            }]
        );
    }

    #[test]
    fn accounts_without_connection_load_no_balances() {
        let mut core = AppCore::new(ENDPOINT.into());
        core.startup();
        let effects = core.update(Event::AccountsLoaded(vec![account("addr-a")]));
        assert!(effects.is_empty());
    }

    #[test]
    fn endpoint_commit_bumps_generation_once() {
        let mut core = connected_core();
        core.update(Event::EndpointEdited("wss://other.example/".into()));
        let effects = core.update(Event::EndpointCommitted);
        assert_eq!(
            effects,
            vec![
                Effect::PersistEndpoint("wss://other.example/".into()),
                Effect::Connect {
                    generation: 2,
                    endpoint: "wss://other.example/".into()
                },
            ]
        );
        assert_eq!(core.connection, ConnectionState::Connecting);
    }

    #[test]
    fn recommitting_active_endpoint_is_a_noop_while_connected() {
        let mut core = connected_core();
        core.update(Event::EndpointEdited(ENDPOINT.into()));
        assert!(core.update(Event::EndpointCommitted).is_empty());
    }

    #[test]
    fn recommitting_after_failure_retries() {
        let mut core = connected_core();
        core.update(Event::ClientFailed {
            generation: 1,
            error: "gone".into(),
        });
        core.update(Event::EndpointEdited(ENDPOINT.into()));
        let effects = core.update(Event::EndpointCommitted);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::Connect { generation: 2, .. })));
    }

    #[test]
    fn stale_client_ready_is_dropped() {
        let mut core = connected_core();
        core.update(Event::EndpointEdited("wss://other.example/".into()));
        core.update(Event::EndpointCommitted);

        // the old connection resolving now must not flip state back
        let effects = core.update(Event::ClientReady {
            generation: 1,
            endpoint: ENDPOINT.into(),
        });
        assert!(effects.is_empty());
        assert_eq!(core.connection, ConnectionState::Connecting);
    }

    #[test]
    fn balance_updates_merge_independently() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a"), account("addr-b")]));
        core.update(Event::BalanceUpdated {
            generation: 1,
            address: "addr-a".into(),
            display: "1.50".into(),
        });
        core.update(Event::BalanceUpdated {
            generation: 1,
            address: "addr-b".into(),
            display: "0.00".into(),
        });
        assert_eq!(core.balances.get("addr-a").unwrap(), "1.50");
        assert_eq!(core.balances.get("addr-b").unwrap(), "0.00");
    }

    #[test]
    fn stale_balance_update_is_dropped() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a")]));
        core.update(Event::EndpointEdited("wss://other.example/".into()));
        core.update(Event::EndpointCommitted);

        let effects = core.update(Event::BalanceUpdated {
            generation: 1,
            address: "addr-a".into(),
            display: "9.99".into(),
        });
        assert!(effects.is_empty());
        assert!(core.balances.is_empty());
    }

    #[test]
    fn balance_failure_is_surfaced_not_thrown() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a")]));
        core.update(Event::BalanceFailed {
            generation: 1,
            address: "addr-a".into(),
            error: "storage query failed".into(),
        });
        assert!(matches!(&core.status, Status::Text(t) if t.contains("addr-a")));
    }

    #[test]
    fn make_raw_requires_connection() {
        let mut core = AppCore::new(ENDPOINT.into());
        core.startup();
        core.update(Event::RecipientEdited("addr-x".into()));
        let effects = core.update(Event::MakeRawClicked);
        assert!(effects.is_empty());
        assert_eq!(core.status, Status::text("Node connection not ready"));
    }

    #[test]
    fn make_raw_twice_is_idempotent() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a")]));
        core.update(Event::BalanceUpdated {
            generation: 1,
            address: "addr-a".into(),
            display: "1.00".into(),
        });
        core.update(Event::RecipientEdited("addr-x".into()));

        let first = core.update(Event::MakeRawClicked);
        let second = core.update(Event::MakeRawClicked);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![Effect::BuildTransfer {
                recipient: "addr-x".into()
            }]
        );
        // the balance map is not disturbed
        assert_eq!(core.balances.get("addr-a").unwrap(), "1.00");
    }

    #[test]
    fn build_failure_leaves_raw_unset() {
        let mut core = connected_core();
        core.update(Event::RecipientEdited("not-an-address".into()));
        core.update(Event::MakeRawClicked);
        core.update(Event::BuildFailed {
            error: "invalid ss58 address".into(),
        });
        assert!(core.raw_transaction.is_empty());
        assert!(matches!(&core.status, Status::Text(t) if t.contains("invalid ss58 address")));
    }

    #[test]
    fn raw_built_fills_editor_and_status() {
        let mut core = connected_core();
        core.update(Event::RawBuilt {
            raw_hex: "0x0403deadbeef".into(),
        });
        assert_eq!(core.raw_transaction, "0x0403deadbeef");
        assert_eq!(core.status, Status::text("Raw created: 0x0403deadbeef"));
    }

    #[test]
    fn sign_without_matching_sender_never_reaches_vault() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a")]));
        core.update(Event::RawEdited("0x0403".into()));

        // the selected account vanishes from the set
        core.selected = Some(account("addr-gone"));
        let effects = core.update(Event::SignClicked);
        assert!(effects.is_empty());
        assert_eq!(core.status, Status::text("Can not find sender"));
    }

    #[test]
    fn sign_uses_selected_sender() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a"), account("addr-b")]));
        core.update(Event::AccountSelected(account("addr-b")));
        core.update(Event::RawEdited("0x0403".into()));

        let effects = core.update(Event::SignClicked);
        assert_eq!(
            effects,
            vec![Effect::SignTransfer {
                raw_hex: "0x0403".into(),
                address: "addr-b".into(),
            }]
        );
    }

    #[test]
    fn submit_success_clears_signed_and_links_explorer() {
        let mut core = connected_core();
        core.update(Event::AccountsLoaded(vec![account("addr-a")]));
        core.update(Event::SignedEdited("0xsigned".into()));

        let effects = core.update(Event::Submitted {
            hash: "0xabcd".into(),
        });
        assert!(core.signed_transaction.is_empty());
        assert_eq!(
            core.status,
            Status::link(
                "Transaction sent.",
                "https://westend.subscan.io/extrinsic/0xabcd"
            )
        );
        // balances refresh after a successful send
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::LoadBalances { .. })));
    }

    #[test]
    fn submit_failure_retains_signed() {
        let mut core = connected_core();
        core.update(Event::SignedEdited("0xsigned".into()));
        core.update(Event::SendClicked);
        core.update(Event::SubmitFailed {
            error: "node rejected".into(),
        });
        assert_eq!(core.signed_transaction, "0xsigned");
        assert!(matches!(&core.status, Status::Text(t) if t.contains("node rejected")));
    }

    #[test]
    fn status_is_overwritten_never_accumulated() {
        let mut core = connected_core();
        core.update(Event::BuildFailed {
            error: "first".into(),
        });
        core.update(Event::BuildFailed {
            error: "second".into(),
        });
        assert_eq!(core.status, Status::text("Error building transaction: second"));
    }
}
