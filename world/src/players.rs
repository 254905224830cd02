use cellsnake_core::{SnakeColor, Turn};

#[derive(Clone, Debug)]
struct Player {
    color: SnakeColor,
    pending: Option<Turn>,
    spawned: bool,
}

/// Pending one-shot turn per player, kept in registration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct PlayerRegister {
    players: Vec<Player>,
}

impl PlayerRegister {
    /// Registers a spawned color with no pending turn.
    pub(crate) fn register(&mut self, color: &SnakeColor) {
        match self.entry_mut(color) {
            Some(player) => {
                player.pending = None;
                player.spawned = true;
            }
            None => self.players.push(Player {
                color: color.clone(),
                pending: None,
                spawned: true,
            }),
        }
    }

    /// Overwrites the pending turn. Colors without a snake are kept but inert.
    pub(crate) fn queue(&mut self, color: &SnakeColor, turn: Turn) {
        match self.entry_mut(color) {
            Some(player) => player.pending = Some(turn),
            None => self.players.push(Player {
                color: color.clone(),
                pending: Some(turn),
                spawned: false,
            }),
        }
    }

    /// Consumes the pending turn for `color`.
    pub(crate) fn take(&mut self, color: &SnakeColor) -> Option<Turn> {
        self.entry_mut(color).and_then(|player| player.pending.take())
    }

    pub(crate) fn pending(&self, color: &SnakeColor) -> Option<Turn> {
        self.players
            .iter()
            .find(|player| &player.color == color)
            .and_then(|player| player.pending)
    }

    /// First color registered through a spawn.
    pub(crate) fn first(&self) -> Option<&SnakeColor> {
        self.colors().next()
    }

    pub(crate) fn colors(&self) -> impl Iterator<Item = &SnakeColor> {
        self.players
            .iter()
            .filter(|player| player.spawned)
            .map(|player| &player.color)
    }

    pub(crate) fn clear(&mut self) {
        self.players.clear();
    }

    fn entry_mut(&mut self, color: &SnakeColor) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| &player.color == color)
    }
}
