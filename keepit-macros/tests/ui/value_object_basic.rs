use chrono::{DateTime, Utc};
use keepit_macros::value_object;

#[value_object]
struct Window {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

#[value_object(debug = false)]
struct Opaque(i32);

#[value_object]
enum Order {
    #[default]
    Asc,
    Desc,
}

fn main() {
    let w = Window::default();
    let _ = format!("{:?}", w);
    assert_eq!(w.clone(), Window { from: None, to: None });

    let _ = Opaque(1);

    let o: Order = Default::default();
    assert!(o == Order::Asc);
    assert!(Order::Desc != o);
}
