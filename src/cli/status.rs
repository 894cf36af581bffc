use crate::db::get_connection;
use crate::error::Result;
use crate::settings::load_settings;

fn join_labels(labels: &std::collections::BTreeSet<String>) -> String {
    labels.iter().cloned().collect::<Vec<_>>().join(", ")
}

pub fn run() -> Result<()> {
    let settings = load_settings()?;
    let db_path = settings.db_path();

    println!("Data dir:       {}", settings.data_dir);
    println!("Database:       {}", db_path.display());
    println!("Month labels:   {}", join_labels(&settings.header.month_labels));
    println!("Amount labels:  {}", join_labels(&settings.header.amount_labels));
    println!("Header scan:    first {} rows", settings.header.scan_rows);

    if db_path.exists() {
        let conn = get_connection(&db_path)?;
        let months: i64 = conn.query_row("SELECT count(*) FROM monthly_amounts", [], |r| r.get(0))?;
        let users: i64 =
            conn.query_row("SELECT count(DISTINCT user_id) FROM monthly_amounts", [], |r| r.get(0))?;
        let imports: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0))?;

        println!();
        println!("Users:          {users}");
        println!("Stored months:  {months}");
        println!("Imports:        {imports}");
    } else {
        println!();
        println!("Database not found. Run `monthbook init` to set up.");
    }
    Ok(())
}
