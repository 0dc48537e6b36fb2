//! Page widgets. Each section renders from the view model and pushes the
//! events it produced; nothing in here mutates application state directly.

use eframe::egui::{self, Color32, RichText};

use crate::core::{ConnectionState, Event, Status, ViewModel};

fn connection_color(state: ConnectionState) -> Color32 {
    match state {
        ConnectionState::Disconnected => Color32::from_rgb(180, 90, 90),
        ConnectionState::Connecting => Color32::from_rgb(200, 180, 100),
        ConnectionState::Connected => Color32::from_rgb(120, 160, 120),
    }
}

pub fn render_page(ui: &mut egui::Ui, view: &ViewModel, out: &mut Vec<Event>) {
    render_header(ui, view);
    ui.separator();
    render_endpoint(ui, view, out);
    ui.add_space(8.0);
    render_accounts(ui, view, out);
    ui.add_space(8.0);
    render_transfer(ui, view, out);
    ui.add_space(8.0);
    render_status(ui, view);
}

fn render_header(ui: &mut egui::Ui, view: &ViewModel) {
    ui.horizontal(|ui| {
        ui.heading("polkasend");
        ui.separator();
        ui.label(
            RichText::new(view.connection.label()).color(connection_color(view.connection)),
        );
    });
}

fn render_endpoint(ui: &mut egui::Ui, view: &ViewModel, out: &mut Vec<Event>) {
    ui.heading("Node endpoint");
    let mut endpoint = view.endpoint_input.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut endpoint)
            .hint_text("wss://...")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        out.push(Event::EndpointEdited(endpoint));
    }
    // commit on enter or focus loss; the reducer ignores non-changes
    if response.lost_focus() {
        out.push(Event::EndpointCommitted);
    }
}

fn render_accounts(ui: &mut egui::Ui, view: &ViewModel, out: &mut Vec<Event>) {
    ui.heading("Accounts");

    if view.accounts.is_empty() {
        ui.label(
            RichText::new("no accounts in the vault (run with --dev for the test trio)")
                .color(Color32::GRAY),
        );
        return;
    }

    egui::Grid::new("accounts")
        .num_columns(4)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label("");
            ui.label(RichText::new("Account").strong());
            ui.label(RichText::new("Source").strong());
            ui.label(RichText::new("Balance").strong());
            ui.end_row();

            for account in &view.accounts {
                let selected = view.selected.as_ref() == Some(account);
                if ui.radio(selected, "").clicked() {
                    out.push(Event::AccountSelected(account.clone()));
                }
                ui.label(RichText::new(account.address.as_str()).monospace());
                ui.label(account.source.as_str());
                let balance = view
                    .balances
                    .get(&account.address)
                    .map(String::as_str)
                    .unwrap_or("0");
                ui.label(format!("{} WND", balance));
                ui.end_row();
            }
        });
}

fn render_transfer(ui: &mut egui::Ui, view: &ViewModel, out: &mut Vec<Event>) {
    ui.heading("Demo: transfer 1 WND to recipient");

    ui.label("Recipient");
    let mut recipient = view.recipient.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut recipient)
            .hint_text("SS58 address")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        out.push(Event::RecipientEdited(recipient));
    }

    if ui
        .add_enabled(
            !view.recipient.trim().is_empty(),
            egui::Button::new("Make Raw"),
        )
        .clicked()
    {
        out.push(Event::MakeRawClicked);
    }

    ui.add_space(6.0);
    ui.label("Raw transaction");
    let mut raw = view.raw_transaction.clone();
    let response = ui.add(
        egui::TextEdit::multiline(&mut raw)
            .desired_rows(4)
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Monospace),
    );
    if response.changed() {
        out.push(Event::RawEdited(raw));
    }

    if ui
        .add_enabled(
            !view.raw_transaction.trim().is_empty(),
            egui::Button::new("Sign transaction"),
        )
        .clicked()
    {
        out.push(Event::SignClicked);
    }

    ui.add_space(6.0);
    ui.label("Signed transaction");
    let mut signed = view.signed_transaction.clone();
    let response = ui.add(
        egui::TextEdit::multiline(&mut signed)
            .desired_rows(4)
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Monospace),
    );
    if response.changed() {
        out.push(Event::SignedEdited(signed));
    }

    if ui
        .add_enabled(
            !view.signed_transaction.trim().is_empty(),
            egui::Button::new("Send Signed"),
        )
        .clicked()
    {
        out.push(Event::SendClicked);
    }
}

fn render_status(ui: &mut egui::Ui, view: &ViewModel) {
    ui.heading("Status");
    match &view.status {
        Status::Text(text) => {
            ui.label(text.as_str());
        }
        Status::Link { text, url } => {
            ui.horizontal(|ui| {
                ui.label(text.as_str());
                ui.hyperlink_to("Open in Explorer", url.as_str());
            });
        }
    }
}
