//! Plain-text rendering of the view models.
//!
//! Renders into any [`fmt::Write`] so the binary can print the output and tests
//! can inspect it as a string.
//!
//! ```text
//! Browse Available Cars
//! Find your perfect car from our curated selection of premium vehicles
//!
//! Search: tesla                                  Sort: Newest First
//! 1 result found  [Clear filters]
//!
//! car-2  Tesla Model Y                                      $58,000
//!        2022 • 12,000 mi • Automatic • electric
//!        San Francisco, CA • Jan 10, 2024 • Available
//! ```

use super::helpers::truncate;
use super::viewmodel::{FilterPanel, ListingCard, ListingDetail, ListingPage, RangeControl};
use std::fmt::{self, Write};

const WIDTH: usize = 66;
const INDENT: &str = "       ";

/// Writes one card as three lines.
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn render_card(out: &mut impl Write, card: &ListingCard) -> fmt::Result {
    let heading = truncate(
        &card.heading,
        WIDTH.saturating_sub(card.id.len() + card.price.len() + 4),
    );
    let pad = WIDTH.saturating_sub(card.id.len() + 2 + heading.chars().count() + card.price.len());
    writeln!(out, "{:<5}  {heading}{}{}", card.id, " ".repeat(pad), card.price)?;
    writeln!(out, "{INDENT}{} • {} • {}", card.year, card.mileage, card.drivetrain)?;
    writeln!(out, "{INDENT}{} • {} • {}", card.location, card.listed, card.status)
}

/// Writes a list of cards separated by blank lines.
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn render_cards(out: &mut impl Write, cards: &[ListingCard]) -> fmt::Result {
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        render_card(out, card)?;
    }
    Ok(())
}

/// Writes the whole listing page.
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn render_page(out: &mut impl Write, page: &ListingPage) -> fmt::Result {
    writeln!(out, "{}", page.header.title)?;
    writeln!(out, "{}", page.header.subtitle)?;
    writeln!(out)?;

    let search = if page.search_bar.query.is_empty() {
        page.search_bar.placeholder
    } else {
        page.search_bar.query.as_str()
    };
    let left = format!("Search: {search}");
    let right = format!("Sort: {}", page.sort_label);
    let pad = WIDTH.saturating_sub(left.chars().count() + right.chars().count()).max(2);
    writeln!(out, "{left}{}{right}", " ".repeat(pad))?;

    if let Some(summary) = &page.summary {
        writeln!(out, "{}  [{}]", summary.text, summary.clear_label)?;
    }
    writeln!(out)?;

    if let Some(empty) = &page.empty_state {
        writeln!(out, "{}", empty.message)?;
        writeln!(out, "{}", empty.subtitle)?;
        return writeln!(out, "[{}]", empty.action_label);
    }

    render_cards(out, &page.cards)
}

/// Writes the detail view of one listing.
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn render_detail(out: &mut impl Write, detail: &ListingDetail) -> fmt::Result {
    render_card(out, &detail.card)?;
    writeln!(out)?;
    writeln!(out, "{}", detail.card.title)?;
    writeln!(out, "{}", detail.description)?;
    writeln!(out)?;
    writeln!(out, "Condition: {}", detail.condition)?;
    if !detail.features.is_empty() {
        writeln!(out, "Features:")?;
        for feature in &detail.features {
            writeln!(out, "  - {feature}")?;
        }
    }
    match &detail.seller_phone {
        Some(phone) => writeln!(out, "Seller: {} ({phone})", detail.seller_name)?,
        None => writeln!(out, "Seller: {}", detail.seller_name)?,
    }
    writeln!(out, "Photos: {}", detail.images.len())
}

fn render_range<T: fmt::Display>(
    out: &mut impl Write,
    label: &str,
    range: &RangeControl<T>,
    unit: &str,
) -> fmt::Result {
    writeln!(
        out,
        "{label}: {unit}{} - {unit}{}  ({unit}{} to {unit}{})",
        range.low, range.high, range.floor, range.ceiling
    )
}

/// Writes the filter sidebar. Selected chips are marked `[x]`.
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn render_filter_panel(out: &mut impl Write, panel: &FilterPanel) -> fmt::Result {
    writeln!(out, "Filters")?;
    for group in &panel.groups {
        writeln!(out)?;
        writeln!(out, "{}", group.label)?;
        for option in &group.options {
            let mark = if option.selected { 'x' } else { ' ' };
            writeln!(out, "  [{mark}] {}", option.label)?;
        }
    }
    writeln!(out)?;
    render_range(out, "Price Range", &panel.price, "$")?;
    render_range(out, "Year", &panel.year, "")?;
    if panel.has_unapplied_edits {
        writeln!(out)?;
        writeln!(out, "[Apply Filters]")?;
    }
    Ok(())
}
