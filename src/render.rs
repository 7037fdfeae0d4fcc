use std::io::{self, Write};

use crate::board::Square;
use crate::position::Position;

/// Draws the board as an 8×8 grid of piece glyphs, rank 8 on top.
pub fn render(w: &mut impl Write, pos: &Position) -> io::Result<()> {
    writeln!(w, "╔═══╦═════════════════════════╗")?;
    for rank in (0..8).rev() {
        write!(w, "║ {} ║", rank + 1)?;
        for file in 0..8 {
            let glyph = Square::from_coords(file, rank)
                .and_then(|sq| pos.piece_at(sq))
                .map_or('·', |piece| piece.glyph());
            write!(w, " {glyph} ")?;
        }
        writeln!(w, " ║")?;
    }
    writeln!(w, "╠═══╬═════════════════════════╣")?;
    writeln!(w, "║   ║ a  b  c  d  e  f  g  h  ║")?;
    writeln!(w, "╚═══╩═════════════════════════╝")?;
    writeln!(w, "{pos}")?;
    w.flush()
}

/// Renders into a `String`.
pub fn render_to_string(pos: &Position) -> String {
    let mut buf = Vec::new();
    render(&mut buf, pos).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
