// ── Wire ↔ domain conversions ──
//
// Everything that knows both vocabularies lives here: the backend's
// Portuguese field names on one side, the domain models on the other.

use chrono::Utc;
use voltra_api::auth::LoginResponse;
use voltra_api::types::{
    AmbienteRecord, DispositivoRecord, EnderecoRecord, ParentRef, UnidadeRecord,
};

use crate::model::{Address, Device, DeviceDraft, Room, RoomDraft, Session, Unit, UnitDraft};

// ── Incoming ────────────────────────────────────────────────────────

impl From<UnidadeRecord> for Unit {
    fn from(wire: UnidadeRecord) -> Self {
        Self {
            id: wire.id.unwrap_or_default(),
            name: wire.nome,
            access_code: wire.codigo_acesso,
            address: Address {
                postal_code: wire.endereco.cep,
                number: wire.endereco.numero,
                street: wire.endereco.logradouro,
                district: wire.endereco.bairro,
                city: wire.endereco.cidade,
                state: wire.endereco.estado,
            },
        }
    }
}

impl From<AmbienteRecord> for Room {
    fn from(wire: AmbienteRecord) -> Self {
        let (unit_id, unit_name) = split_parent(wire.unidade);
        Self {
            id: wire.id.unwrap_or_default(),
            name: wire.nome,
            description: wire.descricao.filter(|d| !d.is_empty()),
            unit_id,
            unit_name,
        }
    }
}

impl From<DispositivoRecord> for Device {
    fn from(wire: DispositivoRecord) -> Self {
        let (room_id, room_name) = split_parent(wire.ambiente);
        Self {
            id: wire.id.unwrap_or_default(),
            name: wire.nome,
            kind: wire.tipo,
            power_watts: wire.potencia,
            active: wire.status,
            room_id,
            room_name,
        }
    }
}

impl From<LoginResponse> for Session {
    fn from(wire: LoginResponse) -> Self {
        Self {
            token: wire.token,
            first_name: wire.nome,
            last_name: wire.sobrenome,
            avatar_url: wire.foto,
            created_at: Utc::now(),
        }
    }
}

fn split_parent(parent: Option<ParentRef>) -> (Option<u64>, Option<String>) {
    match parent {
        Some(p) => (Some(p.id), p.nome),
        None => (None, None),
    }
}

// ── Outgoing ────────────────────────────────────────────────────────

/// Build the save payload for a unit. Only the postal code and number are
/// sent in the address block -- the looked-up street fields are display
/// state, never round-tripped.
pub(crate) fn unit_wire(draft: &UnitDraft, id: Option<u64>) -> UnidadeRecord {
    UnidadeRecord {
        id,
        nome: draft.name.clone(),
        codigo_acesso: draft.access_code.clone(),
        endereco: EnderecoRecord {
            cep: draft.postal_code.clone(),
            numero: draft.number.clone(),
            ..EnderecoRecord::default()
        },
    }
}

pub(crate) fn room_wire(draft: &RoomDraft, id: Option<u64>) -> AmbienteRecord {
    AmbienteRecord {
        id,
        nome: draft.name.clone(),
        descricao: draft.description.clone(),
        unidade: draft.unit_id.map(ParentRef::id_only),
    }
}

pub(crate) fn device_wire(draft: &DeviceDraft, id: Option<u64>) -> DispositivoRecord {
    DispositivoRecord {
        id,
        nome: draft.name.clone(),
        tipo: draft.kind.clone(),
        potencia: draft.power_watts,
        status: draft.active,
        ambiente: draft.room_id.map(ParentRef::id_only),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_keeps_denormalized_unit_name() {
        let wire = AmbienteRecord {
            id: Some(3),
            nome: "Sala 101".into(),
            descricao: Some(String::new()),
            unidade: Some(ParentRef {
                id: 1,
                nome: Some("Bloco A".into()),
            }),
        };
        let room = Room::from(wire);
        assert_eq!(room.unit_id, Some(1));
        assert_eq!(room.unit_name.as_deref(), Some("Bloco A"));
        // Empty descriptions collapse to None so the table shows "-".
        assert_eq!(room.description, None);
    }

    #[test]
    fn update_payload_carries_the_edited_id() {
        let draft = DeviceDraft {
            name: "Ventilador".into(),
            kind: "climatizacao".into(),
            power_watts: 90.0,
            active: false,
            room_id: Some(3),
        };
        let wire = device_wire(&draft, Some(7));
        assert_eq!(wire.id, Some(7));
        assert_eq!(wire.ambiente.map(|a| a.id), Some(3));
    }
}
