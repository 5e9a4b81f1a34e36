//! Roguelike utilities on top of umbra: precise shadowcasting FOV, map
//! generators, and connectivity repair.
//!
//! Generators never own randomness; every operation that draws takes a
//! [`Random`] (any [`rand::Rng`]) from the caller.

mod arc;
pub mod bsp;
pub mod cellular;
pub mod connect;
pub mod drunkard;
pub mod fov;
pub mod random;

pub use bsp::{BspConfig, BspDungeonBuilder, BspNode, Hallway, RoomConfig};
pub use cellular::{CellularAutomata, CellularRule};
pub use connect::{ConnectError, Connection, connect};
pub use drunkard::{DrunkardsWalk, WalkOptions};
pub use fov::{Shadowcaster, VisibilityNode};
pub use random::Random;

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use umbra_core::Point;

    #[test]
    fn visibility_node_round_trip() {
        let node = VisibilityNode {
            pos: Point::new(2, -1),
            range: 2,
            visibility: 0.5,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: VisibilityNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn bsp_tree_round_trip() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut bsp = BspDungeonBuilder::new(40, 30, '#', '.');
        bsp.split_by_count(&mut rng, 2);
        bsp.create_rooms(&mut rng, RoomConfig::default()).unwrap();
        let json = serde_json::to_string(bsp.root()).unwrap();
        let back: BspNode = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, bsp.root());
    }

    #[test]
    fn configs_round_trip() {
        let cfg = BspConfig::default();
        let back: BspConfig = serde_json::from_str(&serde_json::to_string(&cfg).unwrap()).unwrap();
        assert_eq!(cfg, back);
        let rule = CellularRule::default();
        let back: CellularRule = serde_json::from_str(&serde_json::to_string(&rule).unwrap()).unwrap();
        assert_eq!(rule, back);
    }
}
