use faixa_catalog::ProductImage;
use faixa_lib::{SynonymTable, bind_image};

fn image(id: &str, filename: &str) -> ProductImage {
    ProductImage {
        id: id.to_string(),
        src: format!("HONDA/CG 160/{filename}"),
        filename: filename.to_string(),
        position: 0,
        alt: String::new(),
    }
}

#[test]
fn verbatim_token_match() {
    let images = vec![image("1", "cg lateral.jpg"), image("2", "cg tanque.jpg")];
    assert_eq!(bind_image("Tanque", &images, &SynonymTable::default()), Some("2"));
}

#[test]
fn synonym_match_in_both_directions() {
    let images = vec![image("1", "rabeta.jpg"), image("2", "TANQUE ESQUERDO.jpg")];
    let table = SynonymTable::default();
    assert_eq!(bind_image("TQ ESQ", &images, &table), Some("2"));

    let images = vec![image("1", "LAT DIR.jpg"), image("2", "TQ.jpg")];
    assert_eq!(bind_image("Lateral Direito", &images, &table), Some("1"));
}

#[test]
fn injected_table_replaces_defaults() {
    let images = vec![image("1", "TANQUE.jpg")];
    assert_eq!(bind_image("TQ", &images, &SynonymTable::empty()), None);
    let table = SynonymTable::new([("TQ", "TANQUE")]);
    assert_eq!(bind_image("TQ", &images, &table), Some("1"));
}

#[test]
fn no_binding_below_threshold() {
    let images = vec![image("1", "rabeta.jpg")];
    assert_eq!(bind_image("Tanque", &images, &SynonymTable::default()), None);
    assert_eq!(bind_image("", &images, &SynonymTable::default()), None);
}

#[test]
fn ties_favor_earlier_image() {
    let images = vec![image("1", "tanque a.jpg"), image("2", "tanque b.jpg")];
    assert_eq!(bind_image("tanque", &images, &SynonymTable::default()), Some("1"));
}

#[test]
fn more_tokens_win() {
    let images = vec![image("1", "tanque.jpg"), image("2", "tanque lateral.jpg")];
    assert_eq!(bind_image("tanque lateral", &images, &SynonymTable::default()), Some("2"));
}
