use ampa_core::config::Configuration;
use ampa_core::error::AmpaResult;
use ampa_models::{Client, SchoolClass, Student};

pub async fn list_classes(config: Configuration) -> AmpaResult<()> {
    let db_conn = config.db_conn().await?;
    let client = Client::new(db_conn);
    let classes = SchoolClass::get_all(&client).await?;
    for class in classes {
        let enrolled = Student::count_in_class(&client, class.id).await?;
        println!("{:>6}  {:<40} {:>4} students", class.id, class.name, enrolled);
    }
    Ok(())
}
