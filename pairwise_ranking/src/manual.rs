/*!

This is the long-form manual for `pairwise_ranking` and `priorank`.

## The method

A session ranks a fixed catalog of n alternatives (n >= 2) from one expert's
full set of pairwise judgments. Every unordered pair of distinct alternatives
is rated exactly once, in catalog order, with an integer between 1 and 10:

- 1: the second alternative is absolutely preferred
- 5: the alternatives are equivalent
- 10: the first alternative is absolutely preferred

From the n * (n - 1) / 2 ratings, a preference matrix P is built with
`P[i][j] = rating / 10` in the rated direction and the complement
`(10 - rating) / 10` in the derived direction. The raw score of an
alternative is its row sum; the normalized score divides the raw score by
`n * (n - 1)`. Ranks follow descending normalized score, with ties kept in
catalog order.

## Session configuration

`priorank` reads one JSON file per session:

```text
{
  "sessionName": "Sanctions response priorities",
  "expert": "I. Petrov",
  "alternatives": [
    { "code": "A", "label": "Import substitution" },
    { "code": "B", "label": "Export diversification" },
    { "code": "C", "label": "Key rate increase" }
  ],
  "ratings": [
    { "first": "A", "second": "B", "rating": 7 },
    { "first": "A", "second": "C", "rating": 3 },
    { "first": "B", "second": "C", "rating": 9 }
  ]
}
```

- `expert` is optional display metadata. It is echoed in the output and
  never consumed by the scoring algorithm.
- `ratings` may be replaced by `"ratingsFile": "ratings.csv"` pointing to a
  CSV file, resolved relative to the configuration file. When both are
  present, the inline ratings win.
- `outputPath` (optional) selects where the JSON summary is written; the
  `--out` command line flag overrides it.

## Ratings CSV format

One row per pair, first code, second code, rating:

```text
first,second,rating
A,B,7
A,C,3
B,C,9
```

The header row is optional. It is detected by a non-numeric value in the
third column of the first row.

## Checking against a reference

With `--reference summary.json`, the computed summary is compared against a
previously saved one and any difference is reported as an error. This is the
way to pin the outcome of a session in a regression test.

*/
