//! Console command parser.
//!
//! Parses incoming admin-console lines into structured `Command` variants
//! the engine main loop can dispatch on. Unknown or malformed lines parse
//! to `None` and are ignored by the loop.

use crate::world::OrderType;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate the world map: `newworld [seed]`.
    NewWorld { seed: Option<String> },

    /// Found an empire: `empire <name> <color>`.
    Empire { name: String, color: String },

    /// Submit an order for the active turn:
    /// `order <empire> expand <x> <y>`, `order <empire> attack <x> <y> <amount>`,
    /// `order <empire> build <x> <y>`, `order <empire> defend <x> <y>`,
    /// `order <empire> trade`.
    Order {
        empire: u32,
        order_type: OrderType,
        target: Option<(u16, u16)>,
        amount: Option<u32>,
    },

    /// Withdraw a pending order: `cancel <empire> <order>`.
    Cancel { empire: u32, order: u64 },

    /// Process turns: `process` (the active turn) or `process <n>`
    /// (catch up through turn n).
    Process { through: Option<u32> },

    /// Print the active turn number.
    Turn,

    /// Print the narration log: `log` or `log <empire>`.
    Log { empire: Option<u32> },

    /// Print the world snapshot as JSON.
    Dump,

    /// Exit the console loop.
    Quit,
}

/// Parses one console line. Returns `None` for blank or malformed input.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, rest) = tokens.split_first()?;

    match head {
        "newworld" => Some(Command::NewWorld { seed: rest.first().map(|s| s.to_string()) }),

        "empire" => match rest {
            [name, color] => Some(Command::Empire {
                name: name.to_string(),
                color: color.to_string(),
            }),
            _ => None,
        },

        "order" => parse_order(rest),

        "cancel" => match rest {
            [empire, order] => Some(Command::Cancel {
                empire: empire.parse().ok()?,
                order: order.parse().ok()?,
            }),
            _ => None,
        },

        "process" => match rest {
            [] => Some(Command::Process { through: None }),
            [n] => Some(Command::Process { through: Some(n.parse().ok()?) }),
            _ => None,
        },

        "turn" => Some(Command::Turn),

        "log" => match rest {
            [] => Some(Command::Log { empire: None }),
            [empire] => Some(Command::Log { empire: Some(empire.parse().ok()?) }),
            _ => None,
        },

        "dump" => Some(Command::Dump),

        "quit" => Some(Command::Quit),

        _ => None,
    }
}

fn parse_order(rest: &[&str]) -> Option<Command> {
    let (&empire, rest) = rest.split_first()?;
    let empire: u32 = empire.parse().ok()?;
    let (&kind, rest) = rest.split_first()?;
    let order_type = OrderType::parse(kind)?;

    let (target, amount) = match (order_type, rest) {
        (OrderType::Trade, []) => (None, None),
        (OrderType::Attack, [x, y, amount]) => (
            Some((x.parse().ok()?, y.parse().ok()?)),
            Some(amount.parse().ok()?),
        ),
        (OrderType::Expand | OrderType::Build | OrderType::Defend, [x, y]) => {
            (Some((x.parse().ok()?, y.parse().ok()?)), None)
        }
        _ => return None,
    };

    Some(Command::Order { empire, order_type, target, amount })
}
