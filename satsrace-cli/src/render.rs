use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use qrcode::{render::unicode::Dense1x2, QrCode};
use satsrace_core::{
    format_elapsed, PaymentCodeRenderer, PaymentRequest, Player, RaceError, RaceSession, Result,
    FINISH_LINE,
};

const BAR_WIDTH: usize = 40;

/// `[#########...........]  42%`
pub fn progress_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, FINISH_LINE);
    let filled = (progress / FINISH_LINE * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        progress.round() as u64
    )
}

pub fn race_line(progress: f64, taps: u32, elapsed_ms: u64) -> String {
    format!(
        "{}  taps: {:<4} time: {:.1}s",
        progress_bar(progress, BAR_WIDTH),
        taps,
        elapsed_ms as f64 / 1000.0
    )
}

/// 10000 -> "10,000", the same grouping as an en-US `toLocaleString()`
pub fn format_sats(sats: u64) -> String {
    let digits = sats.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn players_table(players: &[Player]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Payout address"]);

    for (index, player) in players.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(player.name()),
            Cell::new(player.payout_address()),
        ]);
    }

    table
}

/// Ranked players first, then everyone who did not finish
pub fn leaderboard_table(session: &RaceSession) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Pos", "Name", "Time"]);

    for player in session.standings() {
        table.add_row(vec![
            Cell::new(player.position().map_or("-".to_string(), |p| p.to_string())),
            Cell::new(player.name()),
            Cell::new(format_elapsed(player.finish_time_ms())),
        ]);
    }

    for player in session.players().iter().filter(|p| !p.has_finished()) {
        table.add_row(vec![
            Cell::new("-"),
            Cell::new(player.name()),
            Cell::new(format_elapsed(None)),
        ]);
    }

    table
}

/// Framed text card with the payout details, for terminals that cannot
/// show an image
#[derive(Debug, Default)]
pub struct TextPaymentCard;

impl PaymentCodeRenderer for TextPaymentCard {
    fn render(&self, request: &PaymentRequest, size_px: u32) -> Result<String> {
        if size_px == 0 {
            return Err(RaceError::render("payment code size must be positive"));
        }

        // roughly 8px per terminal column
        let width = (size_px / 8).clamp(24, 120) as u16;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(width);
        table.set_header(vec![format!("Pay {}", request.label)]);
        table.add_row(vec![request.payout_address.as_str()]);
        table.add_row(vec![format!("{} sats", format_sats(request.amount_sats))]);

        Ok(table.to_string())
    }
}

/// Scannable QR code of the payout address, drawn with half-block
/// characters. Falls back to the text card when the address cannot be
/// encoded.
#[derive(Debug, Default)]
pub struct QrPaymentCode {
    fallback: TextPaymentCard,
}

impl PaymentCodeRenderer for QrPaymentCode {
    fn render(&self, request: &PaymentRequest, size_px: u32) -> Result<String> {
        if size_px == 0 {
            return Err(RaceError::render("payment code size must be positive"));
        }

        let code = match QrCode::new(request.payout_address.as_bytes()) {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!("Cannot encode payout address as QR code: {}", e);
                return self.fallback.render(request, size_px);
            }
        };

        // one terminal column is about 8px wide; the quiet zone takes 4 modules per side
        let columns = size_px / 8;
        let modules = code.width() as u32 + 8;
        let scale = (columns / modules).max(1);

        let image = code
            .render::<Dense1x2>()
            .quiet_zone(true)
            .module_dimensions(scale, scale)
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .build();

        Ok(format!("{}\n{}", image, request.payout_address))
    }
}
