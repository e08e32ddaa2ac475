//! Example: export a record collection to xlsx and read it back

use cellbridge::prelude::*;
use cellbridge::XlsxResult;

struct Item {
    name: &'static str,
    quantity: u32,
    price: f64,
    in_stock: bool,
}

impl Record for Item {
    fn schema() -> Schema<Self> {
        Schema::new("Inventory")
            .field("Name", |i: &Item| i.name)
            .field("Quantity", |i: &Item| i.quantity)
            .field("Price", |i: &Item| i.price)
            .field("InStock", |i: &Item| i.in_stock)
    }
}

fn main() -> XlsxResult<()> {
    let items = [
        Item {
            name: "Item 1",
            quantity: 3,
            price: 100.0,
            in_stock: true,
        },
        Item {
            name: "Item 2",
            quantity: 0,
            price: 200.5,
            in_stock: false,
        },
    ];

    let path = std::env::temp_dir().join("inventory.xlsx");
    cellbridge::write_records(&items, &path)?;
    println!("Created {}", path.display());

    // Show decoded values
    println!("\nDecoded cells:");
    for record in cellbridge::read_all_sheets(&path)? {
        println!(
            "{}!{}{} = {:?}",
            record.sheet, record.column, record.row, record.value
        );
    }

    Ok(())
}
