use anyhow::{Context, Result};
use std::io::Write;

use crate::dog::{format_dogs, Dog};
use crate::store::DogStore;

/// Runs the insert / update / delete walkthrough against `store`, writing
/// the table contents to `out` after each mutation.
pub fn run(store: &DogStore, out: &mut impl Write) -> Result<()> {
    let fido = Dog::new(0, "Fido", 5);
    store.upsert(&fido).context("inserting Fido")?;
    print_dogs(store, out)?;

    let fido = Dog::new(fido.id(), fido.name(), 7);
    store.update(&fido).context("updating Fido")?;
    print_dogs(store, out)?;

    store.delete(fido.id()).context("deleting Fido")?;
    print_dogs(store, out)?;
    Ok(())
}

fn print_dogs(store: &DogStore, out: &mut impl Write) -> Result<()> {
    let dogs = store.list_all().context("listing dogs")?;
    writeln!(out, "{}", format_dogs(&dogs))?;
    Ok(())
}
