use std::thread;
use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;

use pocket_core::event::InputEvent;
use pocket_core::game::{Game, GameExit};
use pocket_core::input::InputSource;
use pocket_core::screen::{RowStyle, Screen};

use crate::intro::{self, IntroOutcome};

pub const WELL_WIDTH: usize = 10;
pub const WELL_HEIGHT: usize = 14;

const TICK: Duration = Duration::from_millis(60);
const INTRO_DEADLINE: Duration = Duration::from_secs(5);
const GAME_OVER_HOLD: Duration = Duration::from_secs(3);
/// Gravity period in ticks at level 0; shrinks as lines clear.
const GRAVITY_START: u32 = 8;
const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

type Cells = [(i8, i8); 4];

/// Cell offsets per piece and rotation (I, O, T, S, Z, J, L).
const SHAPES: [[Cells; 4]; 7] = [
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
    ],
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
    ],
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
    ],
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

#[derive(Debug, Clone, Copy)]
struct Piece {
    kind: usize,
    rot: usize,
    x: i32,
    y: i32,
}

impl Piece {
    fn cells(&self) -> [(i32, i32); 4] {
        let shape = SHAPES[self.kind][self.rot];
        [
            (self.x + i32::from(shape[0].0), self.y + i32::from(shape[0].1)),
            (self.x + i32::from(shape[1].0), self.y + i32::from(shape[1].1)),
            (self.x + i32::from(shape[2].0), self.y + i32::from(shape[2].1)),
            (self.x + i32::from(shape[3].0), self.y + i32::from(shape[3].1)),
        ]
    }
}

/// Falling blocks over a 10x14 well.
pub struct Tetris {
    well: [[bool; WELL_WIDTH]; WELL_HEIGHT],
    piece: Piece,
    score: u32,
    lines: u32,
    gravity_counter: u32,
    over: bool,
    rng: ThreadRng,
}

impl Default for Tetris {
    fn default() -> Self {
        Self::new()
    }
}

impl Tetris {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let piece = Piece {
            kind: rng.gen_range(0..SHAPES.len()),
            rot: 0,
            x: 3,
            y: 0,
        };
        Self {
            well: [[false; WELL_WIDTH]; WELL_HEIGHT],
            piece,
            score: 0,
            lines: 0,
            gravity_counter: 0,
            over: false,
            rng,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn fits(&self, piece: Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            (0..WELL_WIDTH as i32).contains(&x)
                && (0..WELL_HEIGHT as i32).contains(&y)
                && !self.well[y as usize][x as usize]
        })
    }

    /// Try a move; returns whether it was applied.
    fn try_move(&mut self, dx: i32, dy: i32, drot: usize) -> bool {
        let candidate = Piece {
            rot: (self.piece.rot + drot) % 4,
            x: self.piece.x + dx,
            y: self.piece.y + dy,
            ..self.piece
        };
        if self.fits(candidate) {
            self.piece = candidate;
            true
        } else {
            false
        }
    }

    fn lock_piece(&mut self) {
        for (x, y) in self.piece.cells() {
            self.well[y as usize][x as usize] = true;
        }
    }

    fn clear_lines(&mut self) -> u32 {
        let mut kept: Vec<[bool; WELL_WIDTH]> = self
            .well
            .iter()
            .copied()
            .filter(|row| !row.iter().all(|cell| *cell))
            .collect();
        let cleared = (WELL_HEIGHT - kept.len()) as u32;
        while kept.len() < WELL_HEIGHT {
            kept.insert(0, [false; WELL_WIDTH]);
        }
        for (y, row) in kept.iter().enumerate() {
            self.well[y] = *row;
        }
        cleared
    }

    fn spawn(&mut self) {
        let piece = Piece {
            kind: self.rng.gen_range(0..SHAPES.len()),
            rot: 0,
            x: 3,
            y: 0,
        };
        if self.fits(piece) {
            self.piece = piece;
        } else {
            self.over = true;
        }
    }

    fn gravity_interval(&self) -> u32 {
        GRAVITY_START.saturating_sub(self.lines / 8).max(2)
    }

    /// One simulation step. Gravity fires every few ticks; a piece that can
    /// no longer fall locks, full rows clear, and the next piece spawns.
    fn tick(&mut self) {
        if self.over {
            return;
        }
        self.gravity_counter += 1;
        if self.gravity_counter < self.gravity_interval() {
            return;
        }
        self.gravity_counter = 0;
        if !self.try_move(0, 1, 0) {
            self.lock_piece();
            let cleared = self.clear_lines();
            self.lines += cleared;
            self.score += LINE_SCORES[cleared as usize];
            self.spawn();
        }
    }

    /// Returns false when the player backs out of the session.
    fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Back | InputEvent::Quit => return false,
            _ if self.over => {}
            InputEvent::Left => {
                self.try_move(-1, 0, 0);
            }
            InputEvent::Right => {
                self.try_move(1, 0, 0);
            }
            InputEvent::Up | InputEvent::Select => {
                self.try_move(0, 0, 1);
            }
            InputEvent::Down => {
                if self.try_move(0, 1, 0) {
                    self.score += 1;
                }
            }
        }
        true
    }

    fn render(&self, screen: &mut dyn Screen) {
        screen.draw_row(
            0,
            &format!("TETRIS        score {:>6}", self.score),
            RowStyle::Title,
        );
        let piece_cells = self.piece.cells();
        for (y, row) in self.well.iter().enumerate() {
            let mut line = String::with_capacity(WELL_WIDTH + 2);
            line.push('|');
            for (x, cell) in row.iter().enumerate() {
                let falling =
                    !self.over && piece_cells.contains(&(x as i32, y as i32));
                line.push(if *cell || falling { '#' } else { '.' });
            }
            line.push('|');
            screen.draw_row(y + 1, &line, RowStyle::Normal);
        }
        let floor: String = std::iter::once('+')
            .chain(std::iter::repeat_n('-', WELL_WIDTH))
            .chain(std::iter::once('+'))
            .collect();
        screen.draw_row(WELL_HEIGHT + 1, &floor, RowStyle::Normal);
    }
}

impl Game for Tetris {
    fn title(&self) -> &str {
        "TETRIS"
    }

    fn run(&mut self, input: &mut dyn InputSource, screen: &mut dyn Screen) -> GameExit {
        let outcome = intro::wait_for_start(
            "TETRIS",
            "stick to move, up to rotate, down to drop",
            input,
            screen,
            INTRO_DEADLINE,
        );
        if outcome == IntroOutcome::Abort {
            return GameExit::Quit;
        }

        screen.clear();
        loop {
            while let Some(event) = input.poll_event() {
                if !self.handle_event(event) {
                    log::info!("tetris quit, score {}", self.score);
                    return GameExit::Quit;
                }
            }
            self.tick();
            self.render(screen);
            if self.over {
                screen.draw_row(WELL_HEIGHT / 2, "| GAME OVER |", RowStyle::Highlighted);
                intro::wait_for_start("TETRIS", "game over", input, screen, GAME_OVER_HOLD);
                log::info!("tetris over, score {}", self.score);
                return GameExit::GameOver { score: self.score };
            }
            thread::sleep(TICK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_piece(kind: usize) -> Piece {
        Piece {
            kind,
            rot: 0,
            x: 3,
            y: 0,
        }
    }

    fn in_bounds(piece: Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| (0..WELL_WIDTH as i32).contains(&x) && (0..WELL_HEIGHT as i32).contains(&y))
    }

    #[test]
    fn new_game_starts_with_a_piece_in_bounds() {
        let game = Tetris::new();
        assert!(in_bounds(game.piece));
        assert_eq!(game.score, 0);
        assert!(!game.over);
    }

    #[test]
    fn walls_stop_horizontal_movement() {
        let mut game = Tetris::new();
        game.piece = fixed_piece(1); // O piece

        for _ in 0..WELL_WIDTH * 2 {
            game.handle_event(InputEvent::Left);
            assert!(in_bounds(game.piece));
        }
        let leftmost = game.piece.x;
        game.handle_event(InputEvent::Left);
        assert_eq!(game.piece.x, leftmost);

        for _ in 0..WELL_WIDTH * 2 {
            game.handle_event(InputEvent::Right);
            assert!(in_bounds(game.piece));
        }
    }

    #[test]
    fn rotation_is_refused_when_it_would_leave_the_well() {
        let mut game = Tetris::new();
        game.piece = fixed_piece(0); // I piece, horizontal
        for _ in 0..WELL_WIDTH {
            game.handle_event(InputEvent::Left);
        }
        for _ in 0..8 {
            game.handle_event(InputEvent::Up);
            assert!(in_bounds(game.piece));
        }
    }

    #[test]
    fn soft_drop_moves_down_and_scores() {
        let mut game = Tetris::new();
        game.piece = fixed_piece(1);
        let y = game.piece.y;
        game.handle_event(InputEvent::Down);
        assert_eq!(game.piece.y, y + 1);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn gravity_locks_a_grounded_piece() {
        let mut game = Tetris::new();
        game.piece = Piece {
            kind: 1,
            rot: 0,
            x: 3,
            y: (WELL_HEIGHT - 2) as i32, // O piece resting on the floor
        };
        for _ in 0..game.gravity_interval() {
            game.tick();
        }
        let locked: usize = game
            .well
            .iter()
            .map(|row| row.iter().filter(|c| **c).count())
            .sum();
        assert_eq!(locked, 4);
        // A fresh piece spawned at the top.
        assert_eq!(game.piece.y, 0);
    }

    #[test]
    fn clear_lines_drops_rows_above() {
        let mut game = Tetris::new();
        game.well[WELL_HEIGHT - 1] = [true; WELL_WIDTH];
        game.well[WELL_HEIGHT - 2][0] = true;

        assert_eq!(game.clear_lines(), 1);
        assert!(game.well[WELL_HEIGHT - 1][0]);
        assert!(game.well[WELL_HEIGHT - 1][1..].iter().all(|c| !*c));
        assert!(game.well[WELL_HEIGHT - 2].iter().all(|c| !*c));
    }

    #[test]
    fn clearing_a_line_through_gravity_scores() {
        let mut game = Tetris::new();
        // Bottom row full except where the O piece will land.
        game.well[WELL_HEIGHT - 1] = [true; WELL_WIDTH];
        game.well[WELL_HEIGHT - 2] = [true; WELL_WIDTH];
        for x in 4..6 {
            game.well[WELL_HEIGHT - 1][x] = false;
            game.well[WELL_HEIGHT - 2][x] = false;
        }
        game.piece = Piece {
            kind: 1,
            rot: 0,
            x: 3, // O cells occupy columns 4 and 5
            y: (WELL_HEIGHT - 2) as i32,
        };
        for _ in 0..game.gravity_interval() {
            game.tick();
        }
        assert_eq!(game.lines, 2);
        assert_eq!(game.score, LINE_SCORES[2]);
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut game = Tetris::new();
        for row in game.well.iter_mut().take(4) {
            *row = [true; WELL_WIDTH];
        }
        game.spawn();
        assert!(game.over);
        // Further events and ticks are ignored.
        assert!(game.handle_event(InputEvent::Left));
        game.tick();
        assert!(game.over);
    }

    #[test]
    fn back_leaves_the_session() {
        let mut game = Tetris::new();
        assert!(!game.handle_event(InputEvent::Back));
        assert!(!game.handle_event(InputEvent::Quit));
    }

    #[test]
    fn every_shape_rotation_has_four_cells_in_a_4x4_box() {
        for shape in &SHAPES {
            for rot in shape {
                for &(x, y) in rot {
                    assert!((0..4).contains(&x));
                    assert!((0..4).contains(&y));
                }
            }
        }
    }
}
