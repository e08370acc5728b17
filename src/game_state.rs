//! One searchable position: walls by reference, everything else owned.

use crate::actions::{Move, ALL_MOVES};
use crate::config::HeuristicConfig;
use crate::grid::{GridDims, Walls};
use crate::heuristic;
use crate::projectiles::ProjectileField;
use crate::verdict::Verdict;

/// Which side of the position a query is about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Agent {
    Hero,
    Enemy,
}

#[derive(Debug)]
pub struct GameState<'w> {
    walls: &'w Walls,
    projectiles: ProjectileField,
    hero: usize,
    enemy: usize,
    rounds_left: u32,
}

impl<'w> GameState<'w> {
    pub fn new(
        walls: &'w Walls,
        projectiles: ProjectileField,
        hero: usize,
        enemy: usize,
        rounds_left: u32,
    ) -> Self {
        debug_assert!(!walls.is_wall(hero) && !walls.is_wall(enemy));
        Self {
            walls,
            projectiles,
            hero,
            enemy,
            rounds_left,
        }
    }

    pub fn walls(&self) -> &'w Walls {
        self.walls
    }

    pub fn dims(&self) -> GridDims {
        self.walls.dims()
    }

    pub fn projectiles(&self) -> &ProjectileField {
        &self.projectiles
    }

    pub fn hero(&self) -> usize {
        self.hero
    }

    pub fn enemy(&self) -> usize {
        self.enemy
    }

    pub fn position(&self, agent: Agent) -> usize {
        match agent {
            Agent::Hero => self.hero,
            Agent::Enemy => self.enemy,
        }
    }

    pub fn rounds_left(&self) -> u32 {
        self.rounds_left
    }

    /// Play one simultaneous round.
    ///
    /// Go moves are applied without a wall check; callers only pass moves
    /// that `is_move_sensible` accepts. Shots spawn on the shooter's cell
    /// before it moves. If both agents end on the same cell they are put
    /// back, but their shots stay. Hits are not resolved here.
    pub fn apply_moves(&mut self, hero_move: Move, enemy_move: Move) {
        let dims = self.dims();
        let (hero_before, enemy_before) = (self.hero, self.enemy);

        for (cell, mv) in [(&mut self.hero, hero_move), (&mut self.enemy, enemy_move)] {
            match mv {
                Move::Go(dir) => *cell = dims.neighbor(*cell, dir),
                Move::Shoot(dir) => self.projectiles.add_at(*cell, dir),
                Move::Wait => {}
            }
        }

        if self.hero == self.enemy {
            self.hero = hero_before;
            self.enemy = enemy_before;
        }

        self.projectiles.advance(self.walls);
        self.rounds_left = self.rounds_left.saturating_sub(1);
    }

    /// Wait is always allowed; go and shoot need a non-wall cell ahead
    pub fn is_move_sensible(&self, mv: Move, agent: Agent) -> bool {
        match mv.direction() {
            None => true,
            Some(dir) => {
                let ahead = self.dims().neighbor(self.position(agent), dir);
                !self.walls.is_wall(ahead)
            }
        }
    }

    /// Sensible moves of `agent` in canonical order
    pub fn sensible_moves(&self, agent: Agent) -> impl Iterator<Item = Move> + '_ {
        ALL_MOVES
            .into_iter()
            .filter(move |&mv| self.is_move_sensible(mv, agent))
    }

    pub fn hero_hit(&self) -> bool {
        self.projectiles.occupied(self.hero)
    }

    pub fn enemy_hit(&self) -> bool {
        self.projectiles.occupied(self.enemy)
    }

    pub fn is_terminal(&self) -> bool {
        self.hero_hit() || self.enemy_hit()
    }

    pub fn evaluate(&self, config: &HeuristicConfig) -> Verdict {
        match (self.hero_hit(), self.enemy_hit()) {
            (true, true) => Verdict::Draw,
            (true, false) => Verdict::Lose,
            (false, true) => Verdict::Win,
            (false, false) => heuristic::evaluate_open(self, config),
        }
    }

    /// The same position seen from the enemy's side
    pub fn swapped(&self) -> Self {
        Self {
            walls: self.walls,
            projectiles: self.projectiles.clone(),
            hero: self.enemy,
            enemy: self.hero,
            rounds_left: self.rounds_left,
        }
    }
}

impl Clone for GameState<'_> {
    fn clone(&self) -> Self {
        Self {
            walls: self.walls,
            projectiles: self.projectiles.clone(),
            hero: self.hero,
            enemy: self.enemy,
            rounds_left: self.rounds_left,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.walls = source.walls;
        self.projectiles.clone_from(&source.projectiles);
        self.hero = source.hero;
        self.enemy = source.enemy;
        self.rounds_left = source.rounds_left;
    }
}
