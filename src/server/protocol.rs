use crate::creature::CreatureId;
use crate::stats::{CreatureSnapshot, SimulationMetrics, TileSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "update")]
    Update { metrics: SimulationMetrics },
    #[serde(rename = "full_state")]
    FullState {
        metrics: SimulationMetrics,
        width: usize,
        height: usize,
        tiles: Vec<TileSnapshot>,
        creatures: Vec<CreatureSnapshot>,
    },
    #[serde(rename = "tile_details")]
    TileDetails {
        tile: TileSnapshot,
        creatures: Vec<CreatureSnapshot>,
    },
    #[serde(rename = "creature_details")]
    CreatureDetails { creature: CreatureSnapshot },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Requests a spectator may send. None of them change the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "get_state")]
    GetState,
    #[serde(rename = "get_tile")]
    GetTile { x: usize, y: usize },
    #[serde(rename = "get_creature")]
    GetCreature { creature_id: CreatureId },
}

impl ServerMessage {
    pub fn error(message: impl ToString) -> Self {
        ServerMessage::Error {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::resources::FoodStorage;

    #[test]
    fn test_client_messages_parse() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"get_state"}"#).unwrap();
        assert_eq!(msg, ClientMessage::GetState);

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"get_tile","x":2,"y":5}"#).unwrap();
        assert_eq!(msg, ClientMessage::GetTile { x: 2, y: 5 });

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"get_creature","creature_id":12}"#).unwrap();
        assert_eq!(msg, ClientMessage::GetCreature { creature_id: 12 });

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"kill_creature"}"#).is_err());
    }

    #[test]
    fn test_server_messages_are_tagged() {
        let none: Vec<crate::creature::Creature> = Vec::new();
        let metrics = SimulationMetrics::compute(3, &none, FoodStorage::new(), 0, 0);
        let json = serde_json::to_string(&ServerMessage::Update { metrics }).unwrap();
        assert!(json.starts_with(r#"{"type":"update""#));

        let json = serde_json::to_string(&ServerMessage::error("no such tile")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"no such tile"}"#);
    }
}
