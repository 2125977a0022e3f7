//! Hotseat chess console

use hotseat_chess::ui::Console;

fn main() -> std::io::Result<()> {
    println!("Hotseat Chess - two players, one board");
    println!("Type a square (e2) to select, 'help' for commands, 'quit' to exit");

    let mut console = Console::new();
    console.run()
}
