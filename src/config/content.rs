//! Welcome copy and navigation links.
//!
//! Update these tables to change what new members see.

/// Where a navigation button points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// A fixed URL.
    Url(&'static str),
    /// `<topic>/<message>` path inside the chat the member joined.
    InChat(&'static str),
}

/// A labelled navigation button.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub label: &'static str,
    pub target: LinkTarget,
}

const fn in_chat(label: &'static str, path: &'static str) -> Section {
    Section {
        label,
        target: LinkTarget::InChat(path),
    }
}

/// Navigation rows shown under every welcome.
pub const SECTION_ROWS: &[&[Section]] = &[
    &[
        in_chat("ℹ️ Info Servizio", "2/1"),
        in_chat("❗ Sconti Multipli", "11/1"),
    ],
    &[
        in_chat("⭐ Recensioni", "3/1"),
        in_chat("🎁 Giveaway", "13/1"),
    ],
    &[in_chat("📢 Annunci", "7/1")],
];

/// Final call-to-action row: deep link into the booking bot.
pub const BOOKING: Section = Section {
    label: "🍴 Prenota con 50€ di sconto",
    target: LinkTarget::Url("https://t.me/GoldenForkBookingsBot?start=reserve"),
};

/// Shown instead of an empty display name.
pub const FALLBACK_NAME: &str = "ospite";

/// Welcome template. `{members}` receives the joined mentions.
pub const WELCOME_TEMPLATE: &str = "✨ Benvenuti in Golden Fork, {members}! ✨\n\
Il posto dove ogni prenotazione significa 50€ di risparmio.\n\n\
👉 Per iniziare, scegli un’opzione qui sotto:";
