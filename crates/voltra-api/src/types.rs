// Wire types for the Voltra backend.
//
// The backend speaks Portuguese JSON; these structs carry the raw field
// names via serde renames. `voltra-core` converts them to domain models --
// nothing above this crate should ever see `nome` or `codigoAcesso`.

use serde::{Deserialize, Serialize};

/// Reference to a parent record. Sent as `{"id": N}` on create/update;
/// received denormalized as `{"id": N, "nome": ...}` on list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
}

impl ParentRef {
    pub fn id_only(id: u64) -> Self {
        Self { id, nome: None }
    }
}

/// Address block nested inside a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnderecoRecord {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub numero: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
}

/// A unit (`/api/unidades`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnidadeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub nome: String,
    #[serde(rename = "codigoAcesso")]
    pub codigo_acesso: String,
    #[serde(default)]
    pub endereco: EnderecoRecord,
}

/// A room / environment (`/api/ambientes`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbienteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade: Option<ParentRef>,
}

/// A device (`/api/dispositivos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispositivoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub nome: String,
    pub tipo: String,
    pub potencia: f64,
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiente: Option<ParentRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unidade_round_trips_wire_names() {
        let json = r#"{"id":1,"nome":"Bloco A","codigoAcesso":"123","endereco":{"cep":"12345678","numero":"42"}}"#;
        let unidade: UnidadeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(unidade.codigo_acesso, "123");
        assert_eq!(unidade.endereco.cep, "12345678");

        let back = serde_json::to_value(&unidade).unwrap();
        assert_eq!(back["codigoAcesso"], "123");
    }

    #[test]
    fn create_payload_omits_absent_id() {
        let record = DispositivoRecord {
            id: None,
            nome: "Ar-condicionado".into(),
            tipo: "climatizacao".into(),
            potencia: 1400.0,
            status: true,
            ambiente: Some(ParentRef::id_only(3)),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["ambiente"]["id"], 3);
        assert!(value["ambiente"].get("nome").is_none());
    }
}
