use crate::backends::{ResolvedBackend, descriptor_table, locator};
use crate::error::Result;
use crate::packages::privilege;
use crate::ui::table::{self, Cell, Tone};

/// List every supported backend with its detection result. Never prompts.
pub fn run() -> Result<()> {
    let rows: Vec<Vec<Cell>> = descriptor_table()
        .iter()
        .map(|descriptor| {
            let found = locator::locate(descriptor)
                .map(|path| ResolvedBackend::new(descriptor, path));
            let (location, elevation) = match &found {
                Some(backend) => (
                    Cell::new(backend.binary_path().display().to_string(), Tone::Good),
                    Cell::plain(if privilege::needs_elevation(backend) {
                        "sudo"
                    } else {
                        "user"
                    }),
                ),
                None => (Cell::new("not found", Tone::Bad), Cell::new("-", Tone::Dim)),
            };
            vec![
                Cell::plain(descriptor.display_name),
                Cell::plain(descriptor.kind.to_string()),
                location,
                elevation,
            ]
        })
        .collect();

    print!(
        "{}",
        table::render(&["Backend", "Key", "Location", "Installs as"], &rows)
    );
    Ok(())
}
