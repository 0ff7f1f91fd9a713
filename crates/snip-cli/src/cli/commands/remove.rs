//! `snip remove <id>` – delete a link from the local database.

use anyhow::Result;
use snip_core::link_db::{LinkDb, LinkId};

pub async fn run_remove(db: &LinkDb, id: LinkId) -> Result<()> {
    if db.remove_link(id).await? {
        println!("Removed link {id}");
    } else {
        anyhow::bail!("no link with id {id}");
    }
    Ok(())
}
