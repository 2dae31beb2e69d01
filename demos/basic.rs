use propfilter::{MemoryContext, PropertySetterManager};

fn main() {
    env_logger::init();

    let mut manager = PropertySetterManager::new();
    manager
        .parse_string(
            r#"{
                "camera": {
                    "camera:focal": {"value": 50},
                    "image:resolution": {"value": [1920, 1080]},
                    "rendertype:shadow*": {
                        "image:resolution": {"value": [512, 512]}
                    }
                }
            }"#,
        )
        .expect("failed to parse rules");

    // Apply for a beauty pass: the shadow-gated override stays out.
    let mut ctx = MemoryContext::new().set("renderer:rendertype", "beauty");
    manager
        .apply("camera", &mut ctx)
        .expect("failed to apply camera rules");

    println!("beauty resolution:  {:?}", ctx.get("image:resolution"));

    // Same rules against a shadow pass: the gated override wins.
    let mut ctx = MemoryContext::new().set("renderer:rendertype", "shadowmap");
    manager
        .apply("camera", &mut ctx)
        .expect("failed to apply camera rules");

    println!("shadow resolution:  {:?}", ctx.get("image:resolution"));
}
