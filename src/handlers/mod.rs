pub mod help;
mod link;
pub mod start;

use teloxide::{dispatching::UpdateHandler, dptree, prelude::*};

use crate::commands::Command;

pub fn handler_tree() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(crate::commands::answer),
        )
        .branch(Update::filter_message().endpoint(link::handle))
}
