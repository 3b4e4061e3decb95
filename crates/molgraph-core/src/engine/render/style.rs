//! Static visual attributes derived from entity data.

use crate::core::models::link::{BondOrder, Link};
use crate::core::scene::{AttrValue, format_number};

/// Stroke width of a link's primary line: `(2 * bond - 1) * 2`, never negative.
///
/// Constraint links get zero width; single, double and triple bonds get 2, 6
/// and 10 so that separators drawn on top leave visible strokes.
pub fn bond_width(bond: BondOrder) -> f64 {
    ((2.0 * bond.count() as f64 - 1.0) * 2.0).max(0.0)
}

/// Width of the gap line drawn over double and triple bonds.
pub fn separator_width(bond: BondOrder) -> f64 {
    (bond.count() as f64 * 4.0 - 5.0).max(0.0)
}

/// Width of the centre line of a triple bond.
pub fn triple_separator_width() -> f64 {
    bond_width(BondOrder::Single)
}

/// Formats a length in pixels, e.g. `6px`.
pub fn px(value: f64) -> AttrValue {
    AttrValue::Text(format!("{}px", format_number(value)))
}

/// An explicit color wins over the supplied default.
#[inline]
pub fn choose_color<'a>(explicit: Option<&'a str>, default: &'a str) -> &'a str {
    explicit.filter(|c| !c.trim().is_empty()).unwrap_or(default)
}

/// Dash length for dashed links, 0 (solid) otherwise.
pub fn dash_array(link: &Link, dash_length: f64) -> f64 {
    if link.is_dashed() { dash_length } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::link::LinkStyle;

    #[test]
    fn bond_width_grows_with_bond_order() {
        assert_eq!(bond_width(BondOrder::Constraint), 0.0);
        assert_eq!(bond_width(BondOrder::Single), 2.0);
        assert_eq!(bond_width(BondOrder::Double), 6.0);
        assert_eq!(bond_width(BondOrder::Triple), 10.0);
    }

    #[test]
    fn separators_leave_strokes_on_both_sides() {
        assert_eq!(separator_width(BondOrder::Double), 3.0);
        assert_eq!(separator_width(BondOrder::Triple), 7.0);
        assert!(separator_width(BondOrder::Double) < bond_width(BondOrder::Double));
        assert!(triple_separator_width() < separator_width(BondOrder::Triple));
    }

    #[test]
    fn px_formats_without_trailing_zeros() {
        assert_eq!(px(6.0), AttrValue::Text("6px".to_string()));
        assert_eq!(px(2.5), AttrValue::Text("2.5px".to_string()));
    }

    #[test]
    fn explicit_color_wins_over_default() {
        assert_eq!(choose_color(Some("red"), "white"), "red");
        assert_eq!(choose_color(None, "white"), "white");
        assert_eq!(choose_color(Some("  "), "black"), "black");
    }

    #[test]
    fn only_dashed_links_get_a_dash_array() {
        let solid = Link::new(1, 1, 2, BondOrder::Single);
        let dashed = solid.clone().with_style(LinkStyle::Dashed);
        assert_eq!(dash_array(&solid, 5.0), 0.0);
        assert_eq!(dash_array(&dashed, 5.0), 5.0);
    }
}
