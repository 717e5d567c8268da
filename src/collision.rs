/// Bullet resolution: moves projectiles, tests them against the occupancy
/// grids and barricades, and applies the results (kills, score, life loss,
/// erosion).
///
/// Alien bullets are resolved before the ship's bullet. A hit on the ship
/// ends the pass; the ship's bullet is not processed that frame.

use crate::barricade::BarricadeField;
use crate::entities::{Bullet, Ship};
use crate::formation::Formation;
use crate::grid::{Occupant, OccupancyGrid};
use crate::ufo::UfoSpawner;

/// Outcome of resolving every alien bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Volley {
    Missed,
    /// The ship was hit; one life was taken and every bullet cleared.
    ShipHit { lives: u32 },
}

/// What the ship's bullet struck this frame, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shot {
    /// Left the top of the viewport.
    Escaped,
    Alien { slot: usize, reward: u32 },
    Ufo { reward: u32 },
    Barricade,
}

/// Clear every live bullet, ship and alien alike.
pub fn wipe_bullets(ship: &mut Ship, alien_bullets: &mut [Option<Bullet>]) {
    ship.bullet = None;
    alien_bullets.iter_mut().for_each(|slot| *slot = None);
}

pub fn resolve_alien_bullets(
    alien_bullets: &mut [Option<Bullet>],
    ship: &mut Ship,
    barricades: &mut BarricadeField,
    width: u16,
    height: u16,
) -> Volley {
    let footprint = OccupancyGrid::for_ship(ship, width, height);

    for index in 0..alien_bullets.len() {
        let Some(bullet) = alien_bullets[index].as_mut() else {
            continue;
        };

        bullet.entity.pos.y += bullet.vy;
        let pos = bullet.pos();

        if pos.y >= i32::from(height) {
            alien_bullets[index] = None;
        } else if footprint.get(pos) == Occupant::Ship {
            ship.lives = ship.lives.saturating_sub(1);
            wipe_bullets(ship, alien_bullets);
            tracing::info!(lives = ship.lives, "ship hit");
            return Volley::ShipHit { lives: ship.lives };
        } else if barricades.erode(pos).is_some() {
            alien_bullets[index] = None;
        }
    }

    Volley::Missed
}

pub fn resolve_ship_bullet(
    ship: &mut Ship,
    formation: &mut Formation,
    ufo: &mut UfoSpawner,
    barricades: &BarricadeField,
    width: u16,
    height: u16,
) -> Option<Shot> {
    let bullet = ship.bullet.as_mut()?;
    bullet.entity.pos.y += bullet.vy;
    let pos = bullet.pos();

    if pos.y < 0 {
        ship.bullet = None;
        return Some(Shot::Escaped);
    }

    let grid = OccupancyGrid::for_invaders(formation.slots(), formation.frame(), ufo.ufo(), width, height);
    let shot = match grid.get(pos) {
        Occupant::Ufo => {
            let reward = ufo.destroy().map(|ufo| ufo.reward).unwrap_or_default();
            tracing::info!(reward, "ufo destroyed");
            Shot::Ufo { reward }
        }
        Occupant::Alien(slot) => {
            let reward = formation.destroy(slot).map(|alien| alien.reward).unwrap_or_default();
            Shot::Alien { slot, reward }
        }
        Occupant::Ship | Occupant::Empty => {
            if barricades.block_at(pos).is_none() {
                return None;
            }
            Shot::Barricade
        }
    };

    ship.bullet = None;
    if let Shot::Alien { reward, .. } | Shot::Ufo { reward } = shot {
        ship.score = ship.score.saturating_add(reward);
    }
    Some(shot)
}
