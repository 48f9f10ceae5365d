use crate::ClasspathArgs;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    type_ref: String,
    #[tabled(rename = "Modifiers")]
    modifiers: String,
}

pub fn run(class_name: &str, classpath: &ClasspathArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loader = classpath.loader()?;
    let Some(class) = loader.load(class_name)? else {
        return Err(format!("{class_name} is not on the classpath").into());
    };

    println!("{} {} ({})", class.kind, class.canonical_name, class.binary_name);

    let fields = class.fields.iter().map(|f| MemberRow {
        kind: "field",
        name: f.name.to_string(),
        type_ref: f.type_ref.to_string(),
        modifiers: f.modifiers.join(" "),
    });
    let methods = class.methods.iter().map(|m| {
        let params: Vec<String> = m.parameters.iter().map(ToString::to_string).collect();
        MemberRow {
            kind: "method",
            name: format!("{}({})", m.name, params.join(", ")),
            type_ref: m.return_type.to_string(),
            modifiers: m.modifiers.join(" "),
        }
    });
    let rows: Vec<MemberRow> = fields.chain(methods).collect();

    if rows.is_empty() {
        println!("No members.");
    } else {
        println!("{}", Table::new(rows).with(Style::psql()));
    }
    Ok(())
}
