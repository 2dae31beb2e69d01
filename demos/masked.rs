use propfilter::{MemoryContext, SetProperties, Value};

fn main() {
    env_logger::init();

    let mut operation = SetProperties::new();
    operation
        .process_args(
            &[r#"{
                "light": {
                    "light:samples": [
                        {"value": 16, "mask": "spot*"},
                        {"value": 64, "mask": "area*"}
                    ]
                }
            }"#
            .to_owned()],
            &[] as &[&std::path::Path],
        )
        .expect("failed to process rule arguments");

    if !operation.should_run() {
        println!("no rules registered");
        return;
    }

    // The host calls filter_light once per light; the mask picks the block.
    for light in ["spotKey", "areaFill", "distantSun"] {
        let mut ctx = MemoryContext::new().set("object:name", light);
        operation
            .filter_light(&mut ctx)
            .expect("failed to apply light rules");

        match ctx.get("light:samples") {
            Some(Value::Int(samples)) => println!("{light}: {samples} samples"),
            _ => println!("{light}: untouched"),
        }
    }
}
