//! Startup output.

/// Prints `title` centered in a box.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                  order-service                   ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// One indented `name: status` line under a banner.
///
/// ```text
///    ├─ MongoDB: shop_orders
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// Banner plus one line per component, printed once the server is about to bind.
pub fn print_startup_summary(service_name: &str, bind_address: &str, components: &[(&str, String)]) {
    println!();
    print_boxed_title(&format!("🚀 {}", service_name));
    for (name, status) in components {
        print_sub_task(name, status);
    }
    println!("   └─ Listening on: http://{}", bind_address);
    println!();
}
