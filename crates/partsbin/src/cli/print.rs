use chrono::{DateTime, Utc};
use colored::Colorize;
use partsbinapp::commands::{CatalogStats, CmdMessage, CmdResult, MessageLevel};
use partsbinapp::model::{FieldErrors, Listing};
use partsbinapp::query::QueryPage;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 6;
const PRICE_WIDTH: usize = 12;
const CATEGORY_WIDTH: usize = 12;
const TIME_WIDTH: usize = 16;
const FAVORITE_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {} {}", format!("{}:", field).red(), message);
    }
}

pub(super) fn render_page(page: &QueryPage, result: &CmdResult) -> String {
    let mut out = render_listing_rows(&page.items, result);
    if !page.items.is_empty() {
        out.push('\n');
    }
    let mut footer = format!(
        "Page {} of {} ({} matching)",
        page.page, page.total_pages, page.filtered_count
    );
    if page.has_prev() {
        footer.push_str(&format!("  --page {} for previous", page.page - 1));
    }
    if page.has_next() {
        footer.push_str(&format!("  --page {} for next", page.page + 1));
    }
    out.push_str(&footer.dimmed().to_string());
    out.push('\n');

    if !page.available_categories.is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            "Categories:".dimmed(),
            page.available_categories.join(", ")
        ));
    }
    out
}

pub(super) fn render_listing_rows(listings: &[Listing], result: &CmdResult) -> String {
    let mut out = String::new();
    for listing in listings {
        let marker = if result.is_favorite(&listing.id) {
            format!("{} ", FAVORITE_MARKER).yellow().to_string()
        } else {
            "  ".to_string()
        };

        let id = format!("{:>width$}. ", listing.id, width = ID_WIDTH - 2);
        let fixed = 2 + id.width() + PRICE_WIDTH + CATEGORY_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title = truncate_to_width(&listing.title, available);
        let padding = available.saturating_sub(title.width());

        let price = format!("{:>width$}", format_price(listing.price), width = PRICE_WIDTH);
        let category = format!(
            "  {:<width$}",
            truncate_to_width(&listing.category, CATEGORY_WIDTH - 2),
            width = CATEGORY_WIDTH - 2
        );
        let time = format!(
            "{:>width$}",
            format_time_ago(listing.created_at),
            width = TIME_WIDTH
        );

        out.push_str(&format!(
            "{}{}{}{}{}{}{}\n",
            marker,
            id.yellow(),
            title,
            " ".repeat(padding),
            price.green(),
            category.cyan(),
            time.dimmed()
        ));
    }
    out
}

pub(super) fn render_listing_detail(listing: &Listing, favorite: bool) -> String {
    let mut out = String::new();
    let marker = if favorite {
        format!(" {}", FAVORITE_MARKER).yellow().to_string()
    } else {
        String::new()
    };
    out.push_str(&format!(
        "{} {}{}\n",
        format!("#{}", listing.id).yellow(),
        listing.title.bold(),
        marker
    ));
    out.push_str("--------------------------------\n");
    out.push_str(&format!(
        "{}  {}  {}\n",
        format_price(listing.price).green().bold(),
        listing.category.cyan(),
        listing.condition
    ));
    out.push_str(&format!("Quantity: {}\n", listing.quantity));
    if !listing.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", listing.tags.join(", ")));
    }
    if let Some(location) = &listing.location {
        out.push_str(&format!("Location: {}\n", location));
    }
    if let Some(coords) = &listing.coordinates {
        out.push_str(&format!("Coordinates: {:.4}, {:.4}\n", coords.lat, coords.lng));
    }
    if !listing.image.is_empty() {
        out.push_str(&format!("Image: {}\n", listing.image.dimmed()));
    }
    out.push_str(&format!(
        "Listed: {}\n",
        format_time_ago(listing.created_at).trim().dimmed()
    ));
    out.push('\n');
    out.push_str(&listing.description);
    out.push('\n');
    out
}

pub(super) fn render_stats(stats: &CatalogStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Total items:".bold(), stats.total_items));
    out.push_str(&format!("{} {}\n", "Categories: ".bold(), stats.category_count));
    match &stats.newest {
        Some(listing) => out.push_str(&format!(
            "{} #{} {} ({})\n",
            "Newest:     ".bold(),
            listing.id,
            listing.title,
            format_time_ago(listing.created_at).trim()
        )),
        None => out.push_str(&format!("{} {}\n", "Newest:     ".bold(), "none".dimmed())),
    }
    out
}

pub(super) fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
