use faixa_catalog::{HeaderRules, RawRow, RowKind, classify};

fn row(model: &str, color: &str, part: &str, price: Option<f64>) -> RawRow {
    RawRow {
        model: model.to_string(),
        color: color.to_string(),
        part: part.to_string(),
        price,
        ..Default::default()
    }
}

#[test]
fn price_only_rows() {
    let rules = HeaderRules::default();
    assert_eq!(classify(&row("", "", "", None), false, &rules), RowKind::Separator);
    assert_eq!(classify(&row("", "", "", Some(0.0)), false, &rules), RowKind::Separator);
    assert_eq!(classify(&row("", "", "", Some(45.0)), false, &rules), RowKind::Data);
}

#[test]
fn any_keyed_field_makes_data() {
    let rules = HeaderRules::default();
    assert_eq!(classify(&row("", "AZUL", "", None), false, &rules), RowKind::Data);
    assert_eq!(classify(&row("", "", "TANQUE", None), false, &rules), RowKind::Data);

    let mut r = RawRow::default();
    r.location = "A1".to_string();
    assert_eq!(classify(&r, false, &rules), RowKind::Data);

    let mut r = RawRow::default();
    r.reference = "REF-9".to_string();
    assert_eq!(classify(&r, false, &rules), RowKind::Data);
}

#[test]
fn lone_model_is_header_only_on_catch_all_sheet() {
    let rules = HeaderRules::default();
    let header = row("KAWASAKI", "", "", None);
    assert_eq!(classify(&header, true, &rules), RowKind::BrandHeader);
    assert_eq!(classify(&header, false, &rules), RowKind::Data);
}

#[test]
fn model_with_digit_is_not_a_header() {
    let rules = HeaderRules::default();
    assert_eq!(classify(&row("NINJA 250", "", "", None), true, &rules), RowKind::Data);
}

#[test]
fn exclusion_token_vetoes_header() {
    let rules = HeaderRules::default();
    assert_eq!(classify(&row("KIT COMPLETO", "", "", None), true, &rules), RowKind::Data);

    let custom = HeaderRules::new(["adesivo"]);
    assert_eq!(classify(&row("Adesivo Tanque", "", "", None), true, &custom), RowKind::Data);
    assert_eq!(classify(&row("KIT COMPLETO", "", "", None), true, &custom), RowKind::BrandHeader);
}

#[test]
fn header_requires_blank_element_and_zero_price() {
    let rules = HeaderRules::default();
    let mut r = row("DUCATI", "", "", None);
    r.element = "FAIXA".to_string();
    assert_eq!(classify(&r, true, &rules), RowKind::Data);
    assert_eq!(classify(&row("DUCATI", "", "", Some(10.0)), true, &rules), RowKind::Data);
}

#[test]
fn diacritics_do_not_hide_header() {
    let rules = HeaderRules::default();
    assert_eq!(classify(&row("Ténéré", "", "", None), true, &rules), RowKind::BrandHeader);
}
