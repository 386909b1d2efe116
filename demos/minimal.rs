use abreport::{backend::rest::Server, ReportStore};

fn main() {
    const EXPERIMENT: &str = "be0406a7";
    let mut client = Server::new("http://127.0.0.1:8080/api/v1");
    let mut store = ReportStore::new();
    store
        .load(&mut client, &EXPERIMENT.into())
        .expect("Could not load the experiment report");

    let vm = store.view_model();
    if let Some(summary) = vm.summary {
        println!("{}", summary.legend);
    }
    for row in vm.detail {
        println!(
            "{}: {} sessions, {} clicks, improvement {:+.1}%",
            row.name,
            row.sessions,
            row.clicks,
            row.improvement * 100.0
        );
    }
}
