/*!

This is the long-form manual for `aid_scoring` and `aidcompare`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, UTF-8, with a header row
* `xlsx` Excel workbooks. The first worksheet is used unless a worksheet name is given.

The format is inferred from the extension of the file when it is not specified.

### Undergraduate tables

Required columns: `University`, `Types of Aid`, `Scholarship Amounts`,
`Transparency of Info`, `Application Process Clarity`, `Data Disclosure`,
`Timeline Visibility`, `Loans Offered`, `Tools & Support`,
`Web UX & Accessibility`, `Cost of Living Info`, `Overall Impression`.

### Master tables

Required columns: `University`, `Types of Aid`, `Scholarship Amounts`,
`Transparency`, `App Process Clarity`, `Data Disclosure`, `Timeline Visibility`,
`Loans Offered`, `Tools & Support`, `UX & Accessibility`, `Cost of Living Info`,
`Overall Rating`.

The columns may come in any order. Additional columns are kept and exported
unchanged. A table with a missing column, a short row, an empty university
name or a rating that is not a number is refused as a whole.

## Scores

Every evaluation dimension holds a free-text label. The radar chart turns it
into a score between 1 and 5 with the table of the program level. Labels are
matched exactly, and any label that the table does not know gets a score of 3.

| Label | Undergraduate | Master |
|-------|---------------|--------|
| `None` | 1 | 1 |
| `Basic` | 2 | 2 |
| `Limited` | 2 | 2 |
| `Medium` | 3 | 3 |
| `Some stats` | - | 3 |
| `Good` | 4 | 4 |
| `Clear` | 4 | 4 |
| `Defined` | 4 | 4 |
| `Structured` | - | 4 |
| `High` | - | 5 |
| `Very clear` | 5 | 5 |
| `Excellent` | 5 | 5 |
| `Descriptive + stats` | 4 | 4 |
| `Clear eligibility descriptions` | 5 | - |
| `Clear coverage` | 4 | - |
| `Clear per type` | 4 | - |
| `Aggregated only` | 2 | - |
| `User estimates` | 3 | - |
| `Not integrated` | 2 | - |
| `Clear explanations` | - | 5 |
| `Strong descriptions` | - | 4 |
| `Centralized portal` | - | 5 |
| `Detailed listings` | - | 4 |

A dash means that the label falls back to the default score for that level.
The configuration file can add labels or change scores with the `scoreTable`
option of a source.

## Views

* the table shows the selected universities in the order of the file
* the radar chart needs at least two universities
* the detail card is shown when exactly one university is selected
* the ranking sorts by overall rating, best first. Universities with the same
  rating keep the order of the file.

## Configuration

```json
{
  "outputSettings": {
    "outputDirectory": "output",
    "dashboardTitle": "Financial aid benchmarking"
  },
  "sources": [
    {
      "programLevel": "master",
      "provider": "csv",
      "filePath": "data/benchmarking_master.csv",
      "scoreTable": { "Portal + chat": 5 }
    }
  ]
}
```

Relative paths are resolved from the directory of the configuration file.

*/
