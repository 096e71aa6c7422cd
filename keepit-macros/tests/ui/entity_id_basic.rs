use keepit_macros::entity_id;
use uuid::Uuid;

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
struct RecordId(Uuid);

#[entity_id(debug = false)]
struct TicketId(String);

impl std::fmt::Debug for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TicketId(..)")
    }
}

fn main() {
    let raw = Uuid::new_v4();
    let id = RecordId::new(raw);
    let _ = format!("{:?}", id);

    // Display 与 FromStr 委托给内部类型
    let parsed: RecordId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
    assert!("not-a-uuid".parse::<RecordId>().is_err());

    // serde(transparent)：序列化为内部值本身
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{raw}\""));

    let back: Uuid = id.into();
    assert_eq!(back, raw);
    assert_eq!(RecordId::default().into_inner(), Uuid::nil());

    // 手写 Debug 可编译，说明 debug = false 时未自动派生
    let tid = TicketId::new("t-1".to_string());
    assert_eq!(format!("{:?}", tid), "TicketId(..)");
    assert_eq!(tid.as_ref(), "t-1");
}
