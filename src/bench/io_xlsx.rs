// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::bench::{io_common::RawTable, *};

pub fn read_xlsx_table(path: &str, worksheet: Option<&str>) -> BenchResult<RawTable> {
    let wrange = get_range(path, worksheet)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, c)| read_cell(c, path, 1, idx))
        .collect::<BenchResult<Vec<String>>>()?;
    debug!("read_xlsx_table: headers: {:?}", headers);

    let mut rows: Vec<(u64, Vec<String>)> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx as u64 + 2;
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, c)| read_cell(c, path, lineno, col))
            .collect::<BenchResult<Vec<String>>>()?;
        // Blank lines at the end of a sheet are common.
        if cells.iter().all(|c| c.is_empty()) {
            debug!("read_xlsx_table: skipping empty line {}", lineno);
            continue;
        }
        rows.push((lineno, cells));
    }
    Ok(RawTable { headers, rows })
}

fn read_cell(cell: &DataType, path: &str, lineno: u64, col: usize) -> BenchResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        DataType::Empty => Ok("".to_string()),
        other => ExcelWrongCellTypeSnafu {
            path,
            lineno,
            content: format!("column {}: {:?}", col + 1, other),
        }
        .fail(),
    }
}

fn get_range(path: &str, worksheet: Option<&str>) -> BenchResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    match worksheet {
        // A worksheet name was provided, use it.
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                path,
                worksheet: name,
            })?
            .context(OpeningExcelSnafu { path }),
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path }),
    }
}
