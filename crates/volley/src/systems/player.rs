//! Keyboard control for player entities.

use crate::components::{Player, Speed};
use crate::ecs::ComponentStore;
use crate::input::{InputEvent, Key};
use crate::pipeline::EventSystem;

/// Steers every `Speed` + `Player` entity from key events.
///
/// Left/Right press sets the horizontal speed to the player's `move_speed`;
/// releasing any key stops horizontal movement.
pub struct PlayerInputSystem;

impl EventSystem for PlayerInputSystem {
    fn run(&mut self, store: &mut ComponentStore, event: &InputEvent) {
        store.view::<(&mut Speed, &Player)>(|_, (speed, player)| match *event {
            InputEvent::KeyDown(Key::Right) => speed.velocity.x = player.move_speed,
            InputEvent::KeyDown(Key::Left) => speed.velocity.x = -player.move_speed,
            InputEvent::KeyDown(_) => {}
            InputEvent::KeyUp(_) => speed.velocity.x = 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;

    fn spawn_player(store: &mut ComponentStore) -> Entity {
        let e = store.spawn_empty();
        store.insert(e, Speed::zero()).unwrap();
        store.insert(e, Player { move_speed: 7.0 }).unwrap();
        e
    }

    #[test]
    fn arrow_keys_set_horizontal_speed() {
        let mut store = ComponentStore::new();
        let e = spawn_player(&mut store);

        PlayerInputSystem.run(&mut store, &InputEvent::KeyDown(Key::Right));
        assert_eq!(store.get::<Speed>(e).unwrap().velocity.x, 7.0);

        PlayerInputSystem.run(&mut store, &InputEvent::KeyDown(Key::Left));
        assert_eq!(store.get::<Speed>(e).unwrap().velocity.x, -7.0);
    }

    #[test]
    fn any_key_release_stops_movement() {
        let mut store = ComponentStore::new();
        let e = spawn_player(&mut store);

        PlayerInputSystem.run(&mut store, &InputEvent::KeyDown(Key::Left));
        PlayerInputSystem.run(&mut store, &InputEvent::KeyUp(Key::Space));
        assert_eq!(store.get::<Speed>(e).unwrap().velocity.x, 0.0);
    }

    #[test]
    fn unmapped_keys_are_ignored_on_press() {
        let mut store = ComponentStore::new();
        let e = spawn_player(&mut store);

        PlayerInputSystem.run(&mut store, &InputEvent::KeyDown(Key::Up));
        assert_eq!(store.get::<Speed>(e).unwrap().velocity.x, 0.0);
    }

    #[test]
    fn entities_without_player_are_untouched() {
        let mut store = ComponentStore::new();
        let ball = store.spawn_empty();
        store.insert(ball, Speed::new(3.0, 3.0)).unwrap();

        PlayerInputSystem.run(&mut store, &InputEvent::KeyDown(Key::Right));
        assert_eq!(store.get::<Speed>(ball).unwrap().velocity.x, 3.0);
    }
}
