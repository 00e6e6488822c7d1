//! Symbol normalization to the provider's suffix convention.
//!
//! Ticker lists arrive in mixed shapes ("ry", "CNR:TSX", "VTX:TSXV",
//! "XIU.TO"). Everything downstream works with the canonical provider
//! form, so normalization happens once at the edge.

/// Normalize a raw ticker into canonical provider form.
///
/// Applied to the trimmed, uppercased input:
/// - a `:TSXV` qualifier becomes the `.V` suffix
/// - a `:TSX` qualifier becomes the `.TO` suffix
/// - anything already carrying a `.` suffix passes through
/// - bare symbols get `.TO`
/// - empty input stays empty
///
/// The function is total and idempotent.
pub fn normalize(raw: &str) -> String {
    let s = raw.trim().to_uppercase();
    if s.is_empty() {
        return s;
    }
    if let Some(base) = s.strip_suffix(":TSXV") {
        return format!("{base}.V");
    }
    if let Some(base) = s.strip_suffix(":TSX") {
        return format!("{base}.TO");
    }
    if s.contains('.') {
        return s;
    }
    format!("{s}.TO")
}

/// Normalize a batch of raw tickers: empties dropped, duplicates removed,
/// result sorted.
pub fn normalize_all<S: AsRef<str>>(raws: &[S]) -> Vec<String> {
    let mut out: Vec<String> = raws
        .iter()
        .map(|r| normalize(r.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsx_qualifier_maps_to_to_suffix() {
        assert_eq!(normalize("CNR:TSX"), "CNR.TO");
        assert_eq!(normalize("cnr:tsx"), "CNR.TO");
    }

    #[test]
    fn tsxv_qualifier_maps_to_v_suffix() {
        assert_eq!(normalize("VTX:TSXV"), "VTX.V");
        assert_eq!(normalize("vtx:tsxv"), "VTX.V");
    }

    #[test]
    fn dotted_symbols_pass_through() {
        assert_eq!(normalize("RY.TO"), "RY.TO");
        assert_eq!(normalize("abc.v"), "ABC.V");
        assert_eq!(normalize("BRK.B"), "BRK.B");
    }

    #[test]
    fn bare_symbols_get_toronto_suffix() {
        assert_eq!(normalize("RY"), "RY.TO");
        assert_eq!(normalize("td"), "TD.TO");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize("  ry \t"), "RY.TO");
        assert_eq!(normalize(" CNR:TSX "), "CNR.TO");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["ry", "CNR:TSX", "VTX:TSXV", "XIU.TO", "", "  td  "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_all_sorts_and_dedupes() {
        let raws = ["td", "RY.TO", "ry", "", "TD:TSX"];
        assert_eq!(normalize_all(&raws), vec!["RY.TO", "TD.TO"]);
    }
}
