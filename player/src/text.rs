//! Text rendering helpers.

use quest::Param;

/// Replaces `[pN]` placeholders with the value of slot `N`.
///
/// Placeholders naming an unknown slot are left untouched.
#[must_use]
pub fn render_text(text: &str, values: &[i32]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("[p") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let value = if digits > 0 && after[digits..].starts_with(']') {
            after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|slot| slot.checked_sub(1))
                .and_then(|index| values.get(index))
        } else {
            None
        };
        if let Some(value) = value {
            out.push_str(&value.to_string());
            rest = &after[digits + 1..];
        } else {
            out.push_str("[p");
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

/// Renders the display line of every active param whose value falls in one
/// of its display ranges.
#[must_use]
pub fn param_lines(params: &[Param], values: &[i32]) -> Vec<String> {
    params
        .iter()
        .zip(values)
        .filter(|(param, _)| param.active)
        .filter_map(|(param, &value)| param.display_for(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use quest::ParamSlot;

    use super::*;

    #[test]
    fn placeholders_are_replaced() {
        assert_eq!(
            render_text("You have [p1] gold and [p2] hp.", &[40, -3]),
            "You have 40 gold and -3 hp."
        );
        assert_eq!(render_text("[p1][p1]", &[7]), "77");
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        assert_eq!(render_text("[p3] [p0] [px] [p", &[1]), "[p3] [p0] [px] [p");
        assert_eq!(render_text("[p12", &[1]), "[p12");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(render_text("Деньги: [p1] кр.", &[100]), "Деньги: 100 кр.");
    }

    #[test]
    fn lines_follow_display_ranges() {
        let slot = |n| ParamSlot::new(n).unwrap();
        let params = [
            Param::new(slot(1), "Money", -100, 100, 0)
                .show(-100, -1, "Debt: <>")
                .show(0, 100, "Money: <>"),
            Param::new(slot(2), "Hidden", 0, 10, 0)
                .show(0, 10, "Hidden: <>")
                .with_active(false),
            Param::new(slot(3), "Silent", 0, 10, 0),
        ];
        assert_eq!(param_lines(&params, &[-5, 3, 3]), vec!["Debt: -5"]);
        assert_eq!(param_lines(&params, &[5, 3, 3]), vec!["Money: 5"]);
    }
}
