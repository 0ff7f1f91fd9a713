//! `snip list` – show links stored in the local database.

use anyhow::Result;
use snip_core::link_db::LinkDb;

pub async fn run_list(db: &LinkDb) -> Result<()> {
    let links = db.list_links().await?;
    if links.is_empty() {
        println!("No links in database.");
    } else {
        println!("{:<6} {:<8} {}", "ID", "CLICKS", "VALUE");
        for l in links {
            println!("{:<6} {:<8} {}", l.id, l.clicks, l.value);
        }
    }
    Ok(())
}
