use crate::registry;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GamesArg {
    /// Only list games playable in this build
    #[clap(long)]
    playable: bool,
}

pub(crate) fn run(arg: &GamesArg) {
    let GamesArg { playable } = arg;

    for entry in registry::entries() {
        if *playable && !entry.is_playable() {
            continue;
        }
        let status = if entry.is_playable() {
            "playable"
        } else {
            "not available"
        };
        println!(
            "{:<10} {:<18} {status}",
            entry.id.as_str(),
            entry.id.display_name()
        );
    }
}
