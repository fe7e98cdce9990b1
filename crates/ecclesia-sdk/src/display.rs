//! Human-readable formatting

use std::fmt::Write;

use crate::model::EcclesiasticalEntity;

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Brazilian phone number: `(XX) XXXXX-XXXX` for mobiles, `(XX) XXXX-XXXX`
/// for landlines, anything else unchanged.
pub fn format_phone(phone: &str) -> String {
    let d = digits(phone);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => phone.to_string(),
    }
}

/// CEP as `XXXXX-XXX`; anything that is not eight digits is unchanged
pub fn format_postal_code(cep: &str) -> String {
    let d = digits(cep);
    if d.len() == 8 {
        format!("{}-{}", &d[..5], &d[5..])
    } else {
        cep.to_string()
    }
}

/// Plain-text card for one entity
pub fn entity_card(entity: &EcclesiasticalEntity) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", entity.name, entity.kind.label());

    if let Some(ref diocese) = entity.diocese {
        let _ = writeln!(out, "Diocese: {} ({})", diocese.name, diocese.jurisdiction.label());
        if !diocese.bishop.is_empty() {
            let _ = writeln!(out, "Bispo: {}", diocese.bishop);
        }
    }
    if !entity.rector.is_empty() {
        let _ = writeln!(out, "Reitor: {}", entity.rector);
    }

    let location: Vec<&str> = [entity.address.as_str(), entity.city.as_str(), entity.state.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !location.is_empty() {
        let _ = writeln!(out, "Endereço: {}", location.join(", "));
    }
    if !entity.postal_code.is_empty() {
        let _ = writeln!(out, "CEP: {}", format_postal_code(&entity.postal_code));
    }
    if !entity.phone.is_empty() {
        let _ = writeln!(out, "Telefone: {}", format_phone(&entity.phone));
    }
    if !entity.email.is_empty() {
        let _ = writeln!(out, "Email: {}", entity.email);
    }
    if !entity.website.is_empty() {
        let _ = writeln!(out, "Site: {}", entity.website);
    }
    if let (Some(lat), Some(lng)) = (entity.latitude, entity.longitude) {
        let _ = writeln!(out, "Coordenadas: {:.6}, {:.6}", lat, lng);
    }
    if !entity.photos.is_empty() {
        let _ = writeln!(out, "Fotos: {}", entity.photos.len());
    }
    if !entity.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", entity.description);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Diocese, EntityKind, Jurisdiction};

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("(21) 3333-4444"), "(21) 3333-4444");
        assert_eq!(format_phone("2133334444"), "(21) 3333-4444");
        assert_eq!(format_phone("+55 11 98765-4321"), "+55 11 98765-4321");
    }

    #[test]
    fn test_format_postal_code() {
        assert_eq!(format_postal_code("01310100"), "01310-100");
        assert_eq!(format_postal_code("01310-100"), "01310-100");
        assert_eq!(format_postal_code("1234"), "1234");
    }

    #[test]
    fn test_entity_card() {
        let entity = EcclesiasticalEntity {
            id: 1,
            diocese_id: 2,
            name: "Catedral Ortodoxa de São Paulo".into(),
            kind: EntityKind::Cathedral,
            rector: "Pe. Nicolau".into(),
            postal_code: "04001000".into(),
            state: "SP".into(),
            city: "São Paulo".into(),
            address: "Rua Vergueiro, 1515".into(),
            phone: "1155499797".into(),
            email: String::new(),
            website: String::new(),
            description: String::new(),
            latitude: None,
            longitude: None,
            cover_photo_url: None,
            photos: Vec::new(),
            diocese: Some(Diocese {
                id: 2,
                name: "Arquidiocese de São Paulo".into(),
                jurisdiction: Jurisdiction::PatriarchateOfAntioch,
                bishop: String::new(),
                auxiliary_bishops: Vec::new(),
                seat: String::new(),
            }),
        };

        let card = entity_card(&entity);
        assert!(card.starts_with("Catedral Ortodoxa de São Paulo (Catedral)\n"));
        assert!(card.contains("Diocese: Arquidiocese de São Paulo (Patriarcado de Antioquia)"));
        assert!(card.contains("Endereço: Rua Vergueiro, 1515, São Paulo, SP"));
        assert!(card.contains("CEP: 04001-000"));
        assert!(card.contains("Telefone: (11) 5549-9797"));
        assert!(!card.contains("Bispo:"));
        assert!(!card.contains("Email:"));
    }
}
