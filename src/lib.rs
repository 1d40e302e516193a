//! Client-side rule engine for a cooperative real-time maze game.
//!
//! Heroes of four colors explore a maze built from square tiles, steal their
//! articles, and escape before the shared sand clock runs out. This crate
//! owns everything between raw input events and the sync wire: camera
//! transforms, the action state machine, tile placement, hero movement,
//! board effects, and the ordered outbox of change messages. Rendering, the
//! network socket, and the AI solver live outside and are reached through
//! the collaborator traits in [`host`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Engine`]: input handlers and the action mode |
//! | [`placement`] | Committing the picked tile to the board |
//! | [`movement`] | Hero selection, path preview, and move commit |
//! | [`rules`] | Board effects per ruleset |
//! | [`camera`] | Zoom easing, panning, and screen/cell conversion |
//! | [`input`] | Keys, bindings, and [`input::ActionMode`] |
//! | [`board`] | Cells, items, and the board store |
//! | [`tile`] | Tiles, the stock, and tile geometry |
//! | [`hero`] | Heroes, the roster, and pathfinding |
//! | [`player`] | The local player's roles |
//! | [`host`] | Collaborator traits and local implementations |
//! | [`sync`] | Change messages and the outbox |
//! | [`transport`] | Framing the outbox onto a channel |
//! | [`config`] | Environment-driven game configuration |
//! | [`replay`] | Scripted input replay |
//! | [`consts`] | Shared numeric constants |

pub mod board;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod hero;
pub mod host;
pub mod input;
pub mod movement;
pub mod placement;
pub mod player;
pub mod replay;
pub mod rules;
pub mod sync;
pub mod tile;
pub mod transport;

#[cfg(test)]
mod test_support;
