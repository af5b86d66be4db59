use super::protocol::{ClientMessage, ServerMessage};
use crate::creature::CreatureId;
use crate::simulation::SimulationState;
use crate::stats::{CreatureSnapshot, TileSnapshot};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read-only access to the running simulation. Every query holds the read
/// lock for its whole duration, so it never observes a half-finished tick.
#[derive(Clone)]
pub struct StateStream {
    state: Arc<RwLock<SimulationState>>,
}

impl StateStream {
    pub fn new(state: Arc<RwLock<SimulationState>>) -> Self {
        Self { state }
    }

    pub async fn update(&self) -> ServerMessage {
        let state = self.state.read().await;
        ServerMessage::Update {
            metrics: state.metrics(),
        }
    }

    pub async fn full_state(&self) -> ServerMessage {
        let state = self.state.read().await;
        ServerMessage::FullState {
            metrics: state.metrics(),
            width: state.world.width(),
            height: state.world.height(),
            tiles: TileSnapshot::capture_all(&state.world),
            creatures: state.creature_snapshots(),
        }
    }

    pub async fn tile_details(&self, x: usize, y: usize) -> ServerMessage {
        let state = self.state.read().await;
        match state.tile_snapshot(x, y) {
            Ok(tile) => {
                let creatures = state
                    .world
                    .creatures_at(x, y)
                    .into_iter()
                    .map(CreatureSnapshot::from)
                    .collect();
                ServerMessage::TileDetails { tile, creatures }
            }
            Err(e) => ServerMessage::error(e),
        }
    }

    pub async fn creature_details(&self, id: CreatureId) -> ServerMessage {
        let state = self.state.read().await;
        match state.creature_snapshot(id) {
            Ok(creature) => ServerMessage::CreatureDetails { creature },
            Err(e) => ServerMessage::error(e),
        }
    }

    pub async fn respond(&self, request: ClientMessage) -> ServerMessage {
        match request {
            ClientMessage::GetState => self.full_state().await,
            ClientMessage::GetTile { x, y } => self.tile_details(x, y).await,
            ClientMessage::GetCreature { creature_id } => self.creature_details(creature_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::world::tile::TerrainKind;
    use crate::world::World;

    fn stream() -> StateStream {
        let world = World::from_terrain(vec![vec![TerrainKind::Forest; 3]; 2]).unwrap();
        let mut sim = SimulationState::with_seed(world, Config::default(), 1);
        sim.spawn_creatures(3).unwrap();
        StateStream::new(Arc::new(RwLock::new(sim)))
    }

    #[tokio::test]
    async fn test_full_state() {
        match stream().respond(ClientMessage::GetState).await {
            ServerMessage::FullState {
                width,
                height,
                tiles,
                creatures,
                metrics,
            } => {
                assert_eq!((width, height), (3, 2));
                assert_eq!(tiles.len(), 6);
                assert_eq!(creatures.len(), 3);
                assert_eq!(metrics.population, 3);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tile_and_creature_details() {
        let stream = stream();
        match stream.respond(ClientMessage::GetCreature { creature_id: 0 }).await {
            ServerMessage::CreatureDetails { creature } => {
                let reply = stream
                    .respond(ClientMessage::GetTile {
                        x: creature.x,
                        y: creature.y,
                    })
                    .await;
                match reply {
                    ServerMessage::TileDetails { tile, creatures } => {
                        assert!(tile.occupants.contains(&0));
                        assert!(creatures.iter().any(|c| c.id == 0));
                    }
                    other => panic!("unexpected reply: {:?}", other),
                }
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_requests_get_errors() {
        let stream = stream();
        assert!(matches!(
            stream.respond(ClientMessage::GetTile { x: 10, y: 0 }).await,
            ServerMessage::Error { .. }
        ));
        assert!(matches!(
            stream.respond(ClientMessage::GetCreature { creature_id: 99 }).await,
            ServerMessage::Error { .. }
        ));
    }
}
